//! Account HTTP Handlers

use std::sync::LazyLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use yc_common::{phone, AuthUser, IdType, Role, UserProfile};

use super::error::{AuthError, AuthResult};
use super::middleware::ActorId;
use super::password::{hash_password, verify_password};
use crate::api::AppState;
use crate::db::{
    create_account, find_profile, find_user_by_username, is_unique_violation, NewProfile, NewUser,
};

// ============================================================================
// Request Types
// ============================================================================

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (3-32 lowercase alphanumeric + underscore).
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    /// Password (non-empty; never logged).
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    /// Full legal name.
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    /// Phone number in any punctuation; normalized before storage.
    pub phone: String,
    /// Home city (optional).
    #[validate(length(max = 80))]
    pub city: Option<String>,
    /// Account role, fixed for the account's lifetime.
    pub role: Role,
    /// Uploaded national-id document URL.
    pub national_id_url: Option<String>,
    /// Uploaded driver-license or passport document URL.
    pub driver_license_url: Option<String>,
    /// Identity document number.
    pub id_number: Option<String>,
    /// Which identity document was supplied.
    pub id_type: Option<IdType>,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Username validation regex (matches the DB constraint).
static USERNAME_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[a-z0-9_]{3,32}$").unwrap());

// ============================================================================
// Handlers
// ============================================================================

/// Register a new account: credential row, then profile row.
///
/// Username uniqueness is the `users.username` constraint; a violation maps
/// to `UsernameTaken` with no check-then-act lookup. If the profile insert
/// fails the credential row is compensated away (see
/// [`crate::db::create_account`]), so a failed signup leaves nothing behind.
///
/// POST /auth/register
#[tracing::instrument(skip(state, body), fields(username = %body.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AuthUser>)> {
    // Validate input first; nothing is written on a validation failure.
    body.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    if !USERNAME_REGEX.is_match(&body.username) {
        return Err(AuthError::Validation(
            "Username must be 3-32 lowercase letters, digits, or underscores".into(),
        ));
    }

    let normalized_phone = phone::normalize(&body.phone)
        .ok_or_else(|| AuthError::Validation("Phone must be 9 or 12 digits".into()))?;

    // Drivers registering with a NIN must supply a well-formed number and
    // the national-id document reference.
    if body.role == Role::Driver && body.id_type == Some(IdType::Nin) {
        let nin_ok = body
            .id_number
            .as_deref()
            .is_some_and(phone::is_valid_nin);
        if !nin_ok {
            return Err(AuthError::Validation(
                "NIN must be 8 alphanumeric characters".into(),
            ));
        }
        if body.national_id_url.is_none() {
            return Err(AuthError::Validation(
                "National ID document is required for drivers using NIN".into(),
            ));
        }
    }

    let password_hash = hash_password(&body.password).map_err(|_| AuthError::PasswordHash)?;

    let user = create_account(
        &state.db,
        NewUser {
            username: body.username.clone(),
            password_hash,
            role: body.role,
        },
        NewProfile {
            username: body.username,
            full_name: body.full_name,
            phone: normalized_phone,
            city: body.city,
            role: body.role,
            national_id_url: body.national_id_url,
            driver_license_url: body.driver_license_url,
            id_number: body.id_number,
            id_type: body.id_type,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AuthError::UsernameTaken
        } else {
            AuthError::Database(e)
        }
    })?;

    tracing::info!(user_id = %user.id, role = %user.role, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthUser {
            user_id: user.id,
            username: user.username,
            role: user.role,
        }),
    ))
}

/// Verify a username/password pair and report the signed-in identity.
///
/// The profile's role is authoritative; a missing profile falls back to the
/// credential row's role.
///
/// POST /auth/login
#[tracing::instrument(skip(state, body), fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AuthResult<Json<AuthUser>> {
    let user = find_user_by_username(&state.db, &body.username)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let verified = verify_password(&body.password, &user.password_hash).map_err(|e| {
        tracing::error!(user_id = %user.id, error = %e, "Stored password hash is malformed");
        AuthError::PasswordHash
    })?;
    if !verified {
        return Err(AuthError::InvalidCredentials);
    }

    let role = match find_profile(&state.db, user.id).await? {
        Some(profile) => profile.role,
        None => {
            tracing::warn!(user_id = %user.id, "Profile missing at login; using account role");
            user.role
        }
    };

    Ok(Json(AuthUser {
        user_id: user.id,
        username: user.username,
        role,
    }))
}

/// Current user's profile.
///
/// GET /auth/me
#[tracing::instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
) -> AuthResult<Json<UserProfile>> {
    let profile = find_profile(&state.db, actor)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    Ok(Json(profile))
}
