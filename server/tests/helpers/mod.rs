//! Reusable test helpers for HTTP and storage integration tests.
//!
//! Provides a shared database pool, account fixtures, and a small request
//! helper that drives the full axum router via `tower::ServiceExt::oneshot`.
//!
//! DB-backed tests are `#[ignore]`d and expect `DATABASE_URL` to point at a
//! disposable `PostgreSQL` database; run them with `cargo test -- --ignored`.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tower::ServiceExt;
use uuid::Uuid;

use yc_common::Role;
use yc_server::api::{create_router, AppState};
use yc_server::config::Config;
use yc_server::db::{self, NewProfile, NewUser};
use yc_server::rides::ParticipantPolicy;

/// Shared database pool across all tests in the same binary.
static SHARED_POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Connect (once) to the test database and run migrations.
pub async fn shared_pool() -> &'static PgPool {
    SHARED_POOL
        .get_or_init(|| async {
            let url = std::env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set for integration tests");
            let pool = db::create_pool(&url).await.expect("failed to connect");
            db::run_migrations(&pool).await.expect("failed to migrate");
            pool
        })
        .await
}

/// Build the full application router over the shared pool.
pub async fn test_app() -> Router {
    let pool = shared_pool().await.clone();
    let config = Config {
        bind_address: "127.0.0.1:0".into(),
        database_url: String::new(),
    };
    let state = AppState::new(pool, config, Arc::new(ParticipantPolicy));
    create_router(state)
}

/// A username that satisfies the `^[a-z0-9_]{3,32}$` constraint and is
/// unique enough across test runs.
pub fn unique_username(prefix: &str) -> String {
    let suffix: String = Uuid::now_v7().simple().to_string()[20..].to_string();
    format!("{prefix}_{suffix}")
}

/// Create a user + profile directly through the storage layer and return
/// the new user id. The password hash is a fixed argon2 string; these
/// fixtures never log in through the password path.
pub async fn create_test_user(pool: &PgPool, role: Role) -> Uuid {
    let username = unique_username(role.as_str());
    let user = db::create_account(
        pool,
        NewUser {
            username: username.clone(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$fixture".into(),
            role,
        },
        NewProfile {
            username,
            full_name: "Test Account".into(),
            phone: "076123456".into(),
            city: Some("Freetown".into()),
            role,
            national_id_url: None,
            driver_license_url: None,
            id_number: None,
            id_type: None,
        },
    )
    .await
    .expect("failed to create fixture account");
    user.id
}

/// Send a JSON request through the router and decode the JSON response.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    actor: Option<Uuid>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header("x-user-id", actor.to_string());
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
