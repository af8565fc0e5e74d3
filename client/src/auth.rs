//! Sign-in Flows
//!
//! Ties the API client to the device session cache: a successful signup or
//! login persists the session, logout clears it. The session on disk is the
//! only signed-in state; there is nothing to revoke server-side.

use chrono::Utc;
use yc_common::Session;

use crate::api::{ApiClient, ApiError, SignUpParams};
use crate::session::SessionManager;

/// Signup and login against the server, with the resulting session kept in
/// the device cache.
pub struct Authenticator {
    api: ApiClient,
    sessions: SessionManager,
}

impl Authenticator {
    /// Build from an API client and an open session cache.
    #[must_use]
    pub const fn new(api: ApiClient, sessions: SessionManager) -> Self {
        Self { api, sessions }
    }

    /// Create an account and sign the device in as the new user.
    pub async fn sign_up(&self, params: &SignUpParams) -> Result<Session, ApiError> {
        let identity = self.api.sign_up(params).await?;
        let session = Session {
            username: identity.username,
            user_id: identity.user_id,
            role: identity.role,
            created_at: Utc::now(),
        };
        self.persist(&session);
        Ok(session)
    }

    /// Verify credentials and sign the device in.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let identity = self.api.login(username, password).await?;
        let session = Session {
            username: identity.username,
            user_id: identity.user_id,
            role: identity.role,
            created_at: Utc::now(),
        };
        self.persist(&session);
        Ok(session)
    }

    /// Sign the device out. Never fails: a storage error leaves at worst a
    /// stale cache entry, and the next login overwrites it.
    pub fn logout(&self) {
        self.sessions.clear();
    }

    /// Who is currently signed in on this device, if anyone.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.sessions.load()
    }

    /// The underlying API client, for ride calls after sign-in.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.sessions.save(session) {
            // The caller is signed in either way; the cache just won't
            // survive a restart.
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }
}
