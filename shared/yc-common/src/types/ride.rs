//! Ride Types and Lifecycle Rules
//!
//! The transition table lives here as a pure function so that the server's
//! storage guards and any client-side display logic agree on what a legal
//! status change is. The storage layer remains the authority for races: a
//! claim is only ever applied as a conditional update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ride lifecycle status.
///
/// `Requested` and `Scheduled` are both initial states; `Scheduled` carries a
/// non-null `scheduled_at` but follows the same transition rules. `Completed`
/// and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "ride_status", rename_all = "lowercase"))]
pub enum RideStatus {
    /// Rider asked for a ride; no driver attached yet.
    Requested,
    /// Booked for a future time; no driver attached yet.
    Scheduled,
    /// A driver claimed the ride.
    Accepted,
    /// The drive is underway.
    Ongoing,
    /// The drive finished normally.
    Completed,
    /// Either party cancelled before completion.
    Cancelled,
}

impl RideStatus {
    /// Every status, for exhaustive table checks.
    pub const ALL: [Self; 6] = [
        Self::Requested,
        Self::Scheduled,
        Self::Accepted,
        Self::Ongoing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Terminal states permit no further transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// States a driver may claim out of (the "unclaimed" side of the ledger).
    #[must_use]
    pub const fn is_claimable(self) -> bool {
        matches!(self, Self::Requested | Self::Scheduled)
    }

    /// The ride lifecycle transition table.
    ///
    /// Anything not listed here — self-transitions included — is illegal.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Requested | Self::Scheduled, Self::Accepted)
                | (Self::Accepted, Self::Ongoing)
                | (Self::Ongoing, Self::Completed)
                | (
                    Self::Requested | Self::Scheduled | Self::Accepted | Self::Ongoing,
                    Self::Cancelled,
                )
        )
    }

    /// The write-once timestamp column set on the transition into `self`.
    #[must_use]
    pub const fn timestamp_column(self) -> Option<&'static str> {
        match self {
            Self::Accepted => Some("accepted_at"),
            Self::Ongoing => Some("started_at"),
            Self::Completed => Some("completed_at"),
            Self::Cancelled => Some("cancelled_at"),
            Self::Requested | Self::Scheduled => None,
        }
    }

    /// Lowercase wire name, matching serde and the database enum.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Scheduled => "scheduled",
            Self::Accepted => "accepted",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RideStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            "scheduled" => Ok(Self::Scheduled),
            "accepted" => Ok(Self::Accepted),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown ride status: {other}")),
        }
    }
}

/// A ride record as stored in the ledger and returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ride {
    /// Ride ID.
    pub id: Uuid,
    /// Rider who requested the ride (immutable).
    pub rider_id: Uuid,
    /// Driver attached by a successful claim; null until then, set exactly once.
    pub driver_id: Option<Uuid>,
    /// Pickup address.
    pub origin_address: String,
    /// Pickup latitude, if the shell captured one.
    pub origin_lat: Option<f64>,
    /// Pickup longitude.
    pub origin_lng: Option<f64>,
    /// Drop-off address.
    pub destination_address: String,
    /// Drop-off latitude.
    pub destination_lat: Option<f64>,
    /// Drop-off longitude.
    pub destination_lng: Option<f64>,
    /// Requested vehicle class (free-form, e.g. "car").
    pub vehicle_type: String,
    /// Non-null when the ride is booked for a future time.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Current lifecycle status.
    pub status: RideStatus,
    /// When the rider submitted the request.
    pub requested_at: DateTime<Utc>,
    /// Set once when a driver claims the ride.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Set once when the drive starts.
    pub started_at: Option<DateTime<Utc>>,
    /// Set once on completion.
    pub completed_at: Option<DateTime<Utc>>,
    /// Set once on cancellation.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    /// Whether `user_id` is a party to this ride (its rider or its driver).
    #[must_use]
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.rider_id == user_id || self.driver_id == Some(user_id)
    }
}

/// One entry in a ride's transition history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RideEvent {
    /// Event ID.
    pub id: Uuid,
    /// Ride this event belongs to.
    pub ride_id: Uuid,
    /// Who drove the transition; null for system-recorded events.
    pub actor_id: Option<Uuid>,
    /// Status before the transition; null for the creation event.
    pub from_status: Option<RideStatus>,
    /// Status after the transition.
    pub to_status: RideStatus,
    /// Optional free-text note ("Cancelled by rider").
    pub note: Option<String>,
    /// When the transition was recorded.
    pub created_at: DateTime<Utc>,
}
