//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::rides::TransitionPolicy;
use crate::{auth, profiles, rides};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Server configuration
    pub config: Arc<Config>,
    /// Who may drive which ride transitions
    pub transition_policy: Arc<dyn TransitionPolicy>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(db: PgPool, config: Config, transition_policy: Arc<dyn TransitionPolicy>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            transition_policy,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

/// Health check endpoint.
async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth::router())
        .nest("/profiles", profiles::router())
        .nest("/rides", rides::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
