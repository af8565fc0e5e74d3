//! Actor Identification
//!
//! The device session is a client-side cache, not a token, so requests
//! identify their actor with a plain `X-User-Id` header. The extractor
//! rejects requests without a well-formed id; it does not prove identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use super::error::AuthError;

/// Header carrying the acting user's id.
pub const ACTOR_HEADER: &str = "x-user-id";

/// The acting user, taken from the `X-User-Id` header.
///
/// # Usage
///
/// ```ignore
/// async fn handler(ActorId(actor): ActorId) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ActorId(pub Uuid);

impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .ok_or(AuthError::MissingActorHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidActorHeader)?;

        let id: Uuid = raw.parse().map_err(|_| AuthError::InvalidActorHeader)?;
        Ok(Self(id))
    }
}
