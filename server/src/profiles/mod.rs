//! Profile Store
//!
//! Read-only profile lookups. Profiles are written once at signup (see the
//! account service); `is_driver_approved` is flipped by an external admin
//! process and only ever read here.

mod error;
mod handlers;

use axum::routing::get;
use axum::Router;

use crate::api::AppState;

pub use error::ProfileError;

/// Create profile routes.
///
/// - GET /{id} - Public profile for rider/driver detail views
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(handlers::get_profile))
}
