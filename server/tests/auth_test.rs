//! Account integration tests.
//!
//! Tests for critical account flows including:
//! - Password hashing (unit, no database)
//! - Registration and login round trips
//! - Username uniqueness via the storage constraint
//! - Signup compensation (no orphaned credential rows)
//!
//! Run with: `cargo test --test auth_test`
//! Run ignored (integration) tests: `cargo test --test auth_test -- --ignored`

mod helpers;

use axum::http::{Method, StatusCode};
use serde_json::json;

use helpers::{request, shared_pool, test_app, unique_username};
use yc_common::Role;
use yc_server::auth::{hash_password, verify_password};
use yc_server::db::{self, NewProfile, NewUser};

// ============================================================================
// Password Hashing Tests (Unit tests - no database required)
// ============================================================================

#[test]
fn test_password_hash_and_verify_success() {
    let password = "secure_password_123!";
    let hash = hash_password(password).expect("Hashing should succeed");

    // Hash should be different from password
    assert_ne!(hash, password);

    // Verification should succeed
    let verified = verify_password(password, &hash).expect("Verification should succeed");
    assert!(verified, "Correct password should verify");
}

#[test]
fn test_password_verify_wrong_password() {
    let hash = hash_password("correct_password").expect("Hashing should succeed");

    let verified = verify_password("wrong_password", &hash).expect("Verification should succeed");
    assert!(!verified, "Wrong password should not verify");
}

#[test]
fn test_password_hash_produces_unique_hashes() {
    let password = "same_password";

    let hash1 = hash_password(password).expect("Hashing should succeed");
    let hash2 = hash_password(password).expect("Hashing should succeed");

    // Same password should produce different hashes (due to salt)
    assert_ne!(hash1, hash2, "Argon2 salts must differ per hash");

    assert!(verify_password(password, &hash1).unwrap());
    assert!(verify_password(password, &hash2).unwrap());
}

#[test]
fn test_password_verify_rejects_malformed_hash() {
    assert!(verify_password("anything", "not-a-phc-string").is_err());
}

// ============================================================================
// Registration / Login (integration - database required)
// ============================================================================

fn register_body(username: &str, role: &str) -> serde_json::Value {
    json!({
        "username": username,
        "password": "road-to-lumley",
        "full_name": "Fatmata Conteh",
        "phone": "076 123 456",
        "city": "Freetown",
        "role": role,
    })
}

#[tokio::test]
#[ignore]
async fn register_then_login_round_trip() {
    let app = test_app().await;
    let username = unique_username("rider");

    let (status, body) = request(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(register_body(&username, "rider")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    assert_eq!(body["username"], username);
    assert_eq!(body["role"], "rider");
    let user_id = body["user_id"].as_str().unwrap().to_string();

    // Correct password logs in and reports the same identity.
    let (status, body) = request(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": "road-to-lumley" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id.as_str());

    // Wrong password is a credential failure, not a not-found.
    let (status, body) = request(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    // Unknown username is a not-found.
    let (status, body) = request(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": unique_username("ghost"), "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "USER_NOT_FOUND");
}

#[tokio::test]
#[ignore]
async fn duplicate_username_is_a_conflict() {
    let app = test_app().await;
    let username = unique_username("dup");

    let (status, _) = request(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(register_body(&username, "rider")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(register_body(&username, "driver")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "USERNAME_TAKEN");
}

#[tokio::test]
#[ignore]
async fn bad_phone_is_rejected_before_any_write() {
    let app = test_app().await;
    let username = unique_username("phone");

    let mut body = register_body(&username, "rider");
    body["phone"] = json!("12345");

    let (status, response) =
        request(&app, Method::POST, "/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "VALIDATION_ERROR");

    // Nothing was written: the username is still free.
    let pool = shared_pool().await;
    let user = db::find_user_by_username(pool, &username).await.unwrap();
    assert!(user.is_none(), "validation failure must not create a user");
}

#[tokio::test]
#[ignore]
async fn driver_nin_rules_are_enforced() {
    let app = test_app().await;

    // Malformed NIN.
    let mut body = register_body(&unique_username("nin"), "driver");
    body["id_type"] = json!("nin");
    body["id_number"] = json!("SHORT");
    body["national_id_url"] = json!("https://files.example/nid.jpg");
    let (status, response) =
        request(&app, Method::POST, "/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "VALIDATION_ERROR");

    // Well-formed NIN but no document reference.
    let mut body = register_body(&unique_username("nin"), "driver");
    body["id_type"] = json!("nin");
    body["id_number"] = json!("AB12CD34");
    let (status, response) =
        request(&app, Method::POST, "/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "VALIDATION_ERROR");

    // Both present: registration succeeds.
    let mut body = register_body(&unique_username("nin"), "driver");
    body["id_type"] = json!("nin");
    body["id_number"] = json!("AB12CD34");
    body["national_id_url"] = json!("https://files.example/nid.jpg");
    let (status, _) = request(&app, Method::POST, "/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
#[ignore]
async fn failed_profile_insert_removes_the_user() {
    let pool = shared_pool().await;
    let username = unique_username("orphan");

    // The profile phone CHECK rejects this row, after the user insert has
    // already succeeded; create_account must compensate.
    let result = db::create_account(
        pool,
        NewUser {
            username: username.clone(),
            password_hash: hash_password("secret").unwrap(),
            role: Role::Rider,
        },
        NewProfile {
            username: username.clone(),
            full_name: "Orphan Test".into(),
            phone: "123".into(),
            city: None,
            role: Role::Rider,
            national_id_url: None,
            driver_license_url: None,
            id_number: None,
            id_type: None,
        },
    )
    .await;
    assert!(result.is_err(), "profile insert should have failed");

    // The orphaned credential row was rolled back.
    let user = db::find_user_by_username(pool, &username).await.unwrap();
    assert!(user.is_none(), "user must be removed when the profile fails");
}

#[tokio::test]
#[ignore]
async fn me_returns_the_actors_profile() {
    let app = test_app().await;
    let pool = shared_pool().await;
    let user_id = helpers::create_test_user(pool, Role::Driver).await;

    let (status, body) = request(&app, Method::GET, "/auth/me", Some(user_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_str().unwrap(), user_id.to_string());
    assert_eq!(body["role"], "driver");
    assert_eq!(body["is_driver_approved"], false);

    // No actor header is an authentication failure.
    let (status, body) = request(&app, Method::GET, "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHENTICATED");
}
