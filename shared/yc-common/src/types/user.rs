//! User and Session Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role, fixed at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "user_role", rename_all = "lowercase"))]
pub enum Role {
    /// Requests rides.
    Rider,
    /// Claims and carries out rides.
    Driver,
}

impl Role {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rider => "rider",
            Self::Driver => "driver",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of identity document supplied at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "id_type", rename_all = "lowercase"))]
pub enum IdType {
    /// National identification number (8 alphanumeric characters).
    Nin,
    /// Passport number.
    Passport,
}

/// Authenticated identity returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID.
    pub user_id: Uuid,
    /// Username.
    pub username: String,
    /// Role, read from the profile when present.
    pub role: Role,
}

/// Device-local record of who is signed in.
///
/// This is a cache, not a credential: it carries no secret, is never sent to
/// the server except as the `X-User-Id` actor header, and has no server-side
/// revocation. At most one session lives on a device; the last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Username shown by the shell.
    pub username: String,
    /// User ID used as the actor on API calls.
    pub user_id: Uuid,
    /// Role driving which shell (rider/driver) is presented.
    pub role: Role,
    /// When this session was established on the device.
    pub created_at: DateTime<Utc>,
}

/// Profile attributes, written once at signup.
///
/// `is_driver_approved` is flipped by an external admin process; this system
/// only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserProfile {
    /// User ID (same as the account id).
    pub id: Uuid,
    /// Username, duplicated for display.
    pub username: String,
    /// Full legal name.
    pub full_name: String,
    /// Normalized phone number (9 or 12 digits).
    pub phone: String,
    /// Home city, if given.
    pub city: Option<String>,
    /// Account role.
    pub role: Role,
    /// Uploaded national-id document URL (opaque).
    pub national_id_url: Option<String>,
    /// Uploaded driver-license or passport document URL (opaque).
    pub driver_license_url: Option<String>,
    /// Identity document number.
    pub id_number: Option<String>,
    /// Which kind of identity document was supplied.
    pub id_type: Option<IdType>,
    /// Whether an admin has approved this driver account.
    pub is_driver_approved: bool,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_json() {
        let session = Session {
            username: "amina_k".into(),
            user_id: Uuid::now_v7(),
            role: Role::Driver,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Rider).unwrap(), "\"rider\"");
        assert_eq!(serde_json::to_string(&IdType::Nin).unwrap(), "\"nin\"");
    }
}
