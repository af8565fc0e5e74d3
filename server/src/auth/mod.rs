//! Account Service
//!
//! Username/password registration and login against the credential store.
//! There is no server-side session or logout: the signed-in session is a
//! device-local cache owned by the client, and requests identify their actor
//! with the `X-User-Id` header.

mod error;
mod handlers;
mod middleware;
mod password;

use axum::routing::{get, post};
use axum::Router;

use crate::api::AppState;

pub use error::{AuthError, AuthResult};
pub use middleware::ActorId;
pub use password::{hash_password, verify_password};

/// Create account routes.
///
/// - POST /register - Create a user, its profile, and report the identity
/// - POST /login - Verify credentials and report the identity
/// - GET /me - Current user's profile (actor header required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/me", get(handlers::me))
}
