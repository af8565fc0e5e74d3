//! Account Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use yc_common::{error as codes, ErrorBody};

/// Account error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (wrong password).
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No user matches the supplied username.
    #[error("User not found")]
    UserNotFound,

    /// Username already taken (unique constraint rejected the signup).
    #[error("Username already taken")]
    UsernameTaken,

    /// Missing `X-User-Id` header.
    #[error("Missing actor header")]
    MissingActorHeader,

    /// Malformed `X-User-Id` header.
    #[error("Invalid actor header")]
    InvalidActorHeader,

    /// Validation error.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Password hashing error.
    #[error("Password processing failed")]
    PasswordHash,

    /// Database error.
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, codes::INVALID_CREDENTIALS),
            Self::UserNotFound => (StatusCode::NOT_FOUND, codes::USER_NOT_FOUND),
            Self::UsernameTaken => (StatusCode::CONFLICT, codes::USERNAME_TAKEN),
            Self::MissingActorHeader | Self::InvalidActorHeader => {
                (StatusCode::UNAUTHORIZED, codes::UNAUTHENTICATED)
            }
            Self::Validation(_) => (StatusCode::BAD_REQUEST, codes::VALIDATION_ERROR),
            Self::PasswordHash | Self::Database(_) => {
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

/// Result type for account operations.
pub type AuthResult<T> = Result<T, AuthError>;
