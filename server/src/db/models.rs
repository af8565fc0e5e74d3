//! Database Models
//!
//! Row types private to the server. Wire-facing records (`Ride`,
//! `UserProfile`, `RideEvent`) live in `yc-common` and decode straight from
//! query rows via its `sqlx` feature.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use yc_common::{IdType, Role};

/// Credential store row. Never serialized to the wire: the password hash
/// stays inside this crate.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert parameters for a new credential row.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Insert parameters for a new profile row, keyed by the user id after the
/// credential insert succeeds.
#[derive(Debug)]
pub struct NewProfile {
    pub username: String,
    pub full_name: String,
    /// Already normalized to 9 or 12 digits.
    pub phone: String,
    pub city: Option<String>,
    pub role: Role,
    pub national_id_url: Option<String>,
    pub driver_license_url: Option<String>,
    pub id_number: Option<String>,
    pub id_type: Option<IdType>,
}

/// Insert parameters for a new ride.
#[derive(Debug)]
pub struct NewRide {
    pub rider_id: Uuid,
    pub origin_address: String,
    pub origin_lat: Option<f64>,
    pub origin_lng: Option<f64>,
    pub destination_address: String,
    pub destination_lat: Option<f64>,
    pub destination_lng: Option<f64>,
    pub vehicle_type: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}
