//! Ride Request/Response Types

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use yc_common::RideStatus;

/// Ride request body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRideRequest {
    /// Pickup address.
    #[validate(length(min = 1, max = 300))]
    pub origin_address: String,
    /// Pickup latitude.
    pub origin_lat: Option<f64>,
    /// Pickup longitude.
    pub origin_lng: Option<f64>,
    /// Drop-off address.
    #[validate(length(min = 1, max = 300))]
    pub destination_address: String,
    /// Drop-off latitude.
    pub destination_lat: Option<f64>,
    /// Drop-off longitude.
    pub destination_lng: Option<f64>,
    /// Vehicle class; defaults to "car".
    pub vehicle_type: Option<String>,
    /// RFC 3339 timestamp for a scheduled ride; parse failures are
    /// validation errors, not deserialization errors.
    pub scheduled_at: Option<String>,
}

/// Response to a successful ride request.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedRide {
    /// The new ride's id.
    pub id: Uuid,
}

/// Status advance body.
#[derive(Debug, Deserialize)]
pub struct AdvanceStatusRequest {
    /// Target status.
    pub status: RideStatus,
    /// Free-text note recorded on the transition event.
    pub note: Option<String>,
}

/// Status filter for the driver's ride listing, e.g.
/// `?status=accepted,ongoing`.
#[derive(Debug, Default, Deserialize)]
pub struct AssignedQuery {
    /// Comma-separated status names; absent means all.
    pub status: Option<String>,
}
