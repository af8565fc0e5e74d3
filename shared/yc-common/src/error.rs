//! Wire Error Codes
//!
//! Machine-readable error codes shared by the server's JSON error responses
//! and the client's decoder. The server maps its per-module error enums onto
//! these; the client matches on them instead of on message text.

use serde::{Deserialize, Serialize};

/// Malformed or missing input, rejected before any write.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
/// Referenced entity does not exist.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// No user matches the supplied username.
pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
/// Password verification failed.
pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
/// Username uniqueness constraint rejected a signup.
pub const USERNAME_TAKEN: &str = "USERNAME_TAKEN";
/// A claim lost the race to another driver.
pub const ALREADY_CLAIMED: &str = "ALREADY_CLAIMED";
/// Status change not present in the lifecycle table.
pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
/// The transition policy rejected the acting user.
pub const FORBIDDEN: &str = "FORBIDDEN";
/// Actor header missing or malformed.
pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
/// Unclassified dependency failure (storage, network).
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// JSON body carried by every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}
