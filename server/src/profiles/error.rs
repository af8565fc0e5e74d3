//! Profile Error Types

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use yc_common::{error as codes, ErrorBody};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile not found")]
    NotFound,

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, codes::NOT_FOUND),
            Self::Database(err) => {
                tracing::error!(error = %err, "Database error in profiles");
                (StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL_ERROR)
            }
        };

        (
            status,
            Json(ErrorBody {
                error: code.to_string(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
