//! Profile HTTP Handlers

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;
use yc_common::UserProfile;

use super::error::ProfileError;
use crate::api::AppState;
use crate::db::find_profile;

/// Fetch a profile by user id (driver-details and rider-details views).
///
/// GET /profiles/{id}
#[tracing::instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, ProfileError> {
    let profile = find_profile(&state.db, id)
        .await?
        .ok_or(ProfileError::NotFound)?;
    Ok(Json(profile))
}
