//! Typed API Client
//!
//! Thin pass-through to the Yonecab server. Authenticated calls carry the
//! acting user's id in the `X-User-Id` header; every failure decodes into
//! the server's `{ error, message }` body or a transport error. No call
//! retries: callers poll or retry at their own cadence.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use yc_common::{AuthUser, ErrorBody, IdType, Ride, RideEvent, RideStatus, Role, UserProfile};

/// Header carrying the acting user's id.
const ACTOR_HEADER: &str = "x-user-id";

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, decode).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the call with a structured error.
    #[error("{message}")]
    Api {
        /// HTTP status.
        status: StatusCode,
        /// Machine-readable code from `yc_common::error`.
        code: String,
        /// Human-readable message.
        message: String,
    },
}

impl ApiError {
    /// The machine-readable code for server-side rejections.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            Self::Http(_) => None,
        }
    }
}

/// Signup parameters, mirroring the register endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpParams {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub city: Option<String>,
    pub role: Role,
    pub national_id_url: Option<String>,
    pub driver_license_url: Option<String>,
    pub id_number: Option<String>,
    pub id_type: Option<IdType>,
}

/// Ride request parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RideParams {
    pub origin_address: String,
    pub origin_lat: Option<f64>,
    pub origin_lng: Option<f64>,
    pub destination_address: String,
    pub destination_lat: Option<f64>,
    pub destination_lng: Option<f64>,
    pub vehicle_type: Option<String>,
    /// RFC 3339 timestamp for a scheduled ride.
    pub scheduled_at: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct CreatedRide {
    id: Uuid,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct AdvanceBody<'a> {
    status: RideStatus,
    note: Option<&'a str>,
}

/// Client for the Yonecab server API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn request(&self, method: Method, path: &str, actor: Option<Uuid>) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{path}", self.base_url));
        if let Some(actor) = actor {
            builder = builder.header(ACTOR_HEADER, actor.to_string());
        }
        builder
    }

    /// Send and decode, translating non-success responses into [`ApiError::Api`].
    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = match response.json::<ErrorBody>().await {
            Ok(body) => body,
            Err(_) => ErrorBody {
                error: yc_common::error::INTERNAL_ERROR.into(),
                message: format!("Server returned {status}"),
            },
        };
        Err(ApiError::Api {
            status,
            code: body.error,
            message: body.message,
        })
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Register a new account.
    pub async fn sign_up(&self, params: &SignUpParams) -> Result<AuthUser, ApiError> {
        Self::send(
            self.request(Method::POST, "/auth/register", None)
                .json(params),
        )
        .await
    }

    /// Verify credentials and report the signed-in identity.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthUser, ApiError> {
        Self::send(
            self.request(Method::POST, "/auth/login", None)
                .json(&LoginBody { username, password }),
        )
        .await
    }

    /// The acting user's own profile.
    pub async fn me(&self, actor: Uuid) -> Result<UserProfile, ApiError> {
        Self::send(self.request(Method::GET, "/auth/me", Some(actor))).await
    }

    /// Any user's public profile (driver/rider detail views).
    pub async fn profile(&self, actor: Uuid, user_id: Uuid) -> Result<UserProfile, ApiError> {
        Self::send(self.request(Method::GET, &format!("/profiles/{user_id}"), Some(actor))).await
    }

    // ------------------------------------------------------------------
    // Rides
    // ------------------------------------------------------------------

    /// Request a ride; returns the new ride's id.
    pub async fn request_ride(&self, actor: Uuid, params: &RideParams) -> Result<Uuid, ApiError> {
        let created: CreatedRide =
            Self::send(self.request(Method::POST, "/rides", Some(actor)).json(params)).await?;
        Ok(created.id)
    }

    /// Fetch one ride.
    pub async fn ride(&self, actor: Uuid, ride_id: Uuid) -> Result<Ride, ApiError> {
        Self::send(self.request(Method::GET, &format!("/rides/{ride_id}"), Some(actor))).await
    }

    /// Claimable rides, newest first.
    pub async fn unclaimed_rides(&self, actor: Uuid) -> Result<Vec<Ride>, ApiError> {
        Self::send(self.request(Method::GET, "/rides/unclaimed", Some(actor))).await
    }

    /// The acting rider's rides, newest first.
    pub async fn my_rides(&self, actor: Uuid) -> Result<Vec<Ride>, ApiError> {
        Self::send(self.request(Method::GET, "/rides/mine", Some(actor))).await
    }

    /// The acting driver's rides, filtered by status when non-empty.
    pub async fn assigned_rides(
        &self,
        actor: Uuid,
        statuses: &[RideStatus],
    ) -> Result<Vec<Ride>, ApiError> {
        let path = if statuses.is_empty() {
            "/rides/assigned".to_string()
        } else {
            let filter: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
            format!("/rides/assigned?status={}", filter.join(","))
        };
        Self::send(self.request(Method::GET, &path, Some(actor))).await
    }

    /// Claim a ride for the acting driver.
    pub async fn claim_ride(&self, actor: Uuid, ride_id: Uuid) -> Result<Ride, ApiError> {
        Self::send(self.request(Method::POST, &format!("/rides/{ride_id}/claim"), Some(actor)))
            .await
    }

    /// Advance a ride's status.
    pub async fn advance_status(
        &self,
        actor: Uuid,
        ride_id: Uuid,
        status: RideStatus,
        note: Option<&str>,
    ) -> Result<Ride, ApiError> {
        Self::send(
            self.request(Method::POST, &format!("/rides/{ride_id}/status"), Some(actor))
                .json(&AdvanceBody { status, note }),
        )
        .await
    }

    /// Cancel a ride. The server records who cancelled in the ride history.
    pub async fn cancel_ride(&self, actor: Uuid, ride_id: Uuid) -> Result<Ride, ApiError> {
        Self::send(self.request(Method::POST, &format!("/rides/{ride_id}/cancel"), Some(actor)))
            .await
    }

    /// A ride's transition history, oldest first.
    pub async fn ride_events(&self, actor: Uuid, ride_id: Uuid) -> Result<Vec<RideEvent>, ApiError> {
        Self::send(self.request(Method::GET, &format!("/rides/{ride_id}/events"), Some(actor)))
            .await
    }
}
