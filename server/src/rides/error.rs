//! Ride Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use yc_common::{error as codes, ErrorBody, RideStatus};

/// Ride operation errors.
#[derive(Debug, Error)]
pub enum RideError {
    /// Ride id does not exist.
    #[error("Ride not found")]
    NotFound,

    /// A claim lost the race: another driver already holds the ride.
    #[error("Ride already claimed by another driver")]
    AlreadyClaimed,

    /// Status change not present in the lifecycle table.
    #[error("Cannot move ride from {from} to {to}")]
    InvalidTransition {
        /// Status the ride is in.
        from: RideStatus,
        /// Status the caller asked for.
        to: RideStatus,
    },

    /// The transition policy rejected the acting user.
    #[error("Actor may not modify this ride")]
    Forbidden,

    /// Validation error.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for RideError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, codes::NOT_FOUND),
            Self::AlreadyClaimed => (StatusCode::CONFLICT, codes::ALREADY_CLAIMED),
            Self::InvalidTransition { .. } => (StatusCode::CONFLICT, codes::INVALID_TRANSITION),
            Self::Forbidden => (StatusCode::FORBIDDEN, codes::FORBIDDEN),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, codes::VALIDATION_ERROR),
            Self::Database(err) => {
                tracing::error!(error = %err, "Database error in rides");
                (StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL_ERROR)
            }
        };

        let body = Json(ErrorBody {
            error: code.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type for ride operations.
pub type RideResult<T> = Result<T, RideError>;
