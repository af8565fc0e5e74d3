//! Yonecab Client Core
//!
//! The device-side half of the platform: a local session cache, a typed API
//! client for the Yonecab server, and the cancellable polling loops the
//! rider and driver shells consume. No rendering or navigation lives here.

pub mod api;
pub mod auth;
pub mod poll;
pub mod session;

pub use api::{ApiClient, ApiError, RideParams, SignUpParams};
pub use auth::Authenticator;
pub use poll::PollHandle;
pub use session::{SessionManager, SessionStore, SessionStoreError};
