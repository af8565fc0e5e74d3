//! Ride Lifecycle & Matching
//!
//! The ride ledger's write paths: request, claim, advance, cancel. The
//! lifecycle table itself lives in `yc-common`; this module enforces it at
//! the storage boundary with conditional updates, so concurrent writers
//! cannot bypass the guards.

mod error;
mod handlers;
mod policy;
mod types;

use axum::routing::{get, post};
use axum::Router;

use crate::api::AppState;

pub use error::{RideError, RideResult};
pub use policy::{DriverDrivesPolicy, ParticipantPolicy, TransitionPolicy};
pub use types::{AdvanceStatusRequest, CreateRideRequest, CreatedRide};

/// Create ride routes.
///
/// - POST / - Request a ride
/// - GET /unclaimed - Claimable rides, newest first (driver polling feed)
/// - GET /mine - The acting rider's rides
/// - GET /assigned - The acting driver's rides, optionally filtered by status
/// - GET /{id} - Single ride (rider status polling)
/// - GET /{id}/events - Transition history
/// - POST /{id}/claim - Attach the acting driver (at most one ever succeeds)
/// - POST /{id}/status - Advance the lifecycle
/// - POST /{id}/cancel - Cancel from any non-terminal state
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::request_ride))
        .route("/unclaimed", get(handlers::list_unclaimed))
        .route("/mine", get(handlers::list_mine))
        .route("/assigned", get(handlers::list_assigned))
        .route("/{id}", get(handlers::get_ride))
        .route("/{id}/events", get(handlers::list_events))
        .route("/{id}/claim", post(handlers::claim))
        .route("/{id}/status", post(handlers::advance_status))
        .route("/{id}/cancel", post(handlers::cancel))
}
