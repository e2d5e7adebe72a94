//! Integration tests for the login and role-gate flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Demo accounts seeded: `cargo run -p hifz-cli -- seed --password ...`
//! - The server running (cargo run -p hifz-server)
//!
//! Run with: cargo test -p hifz-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use hifz_integration_tests::{base_url, client, login, login_response, test_password};

// ============================================================================
// Public Endpoints
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_login_succeeds_with_seeded_teacher() {
    let client = client();
    let token = login(&client, "teacher1", &test_password()).await;

    // The token is opaque but must be presentable back
    let resp = client
        .get(format!("{}/me", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to call /me");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse /me");
    assert_eq!(body["username"], "teacher1");
    assert_eq!(body["role"], "teacher");
}

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_login_failures_are_indistinguishable() {
    let client = client();

    // Wrong password for an existing user
    let wrong_password = login_response(&client, "teacher1", "definitely-wrong").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body: Value = wrong_password.json().await.expect("no body");

    // Unknown username
    let unknown = login_response(&client, "nobody", "definitely-wrong").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: Value = unknown.json().await.expect("no body");

    // Identical error message for both causes
    assert_eq!(wrong_password_body, unknown_body);
}

// ============================================================================
// Session Validation
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_protected_route_without_token_is_401() {
    let resp = client()
        .get(format!("{}/me", base_url()))
        .send()
        .await
        .expect("Failed to call /me");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_garbage_token_is_401() {
    let resp = client()
        .get(format!("{}/me", base_url()))
        .bearer_auth("not.a.token")
        .send()
        .await
        .expect("Failed to call /me");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_tampered_token_is_401() {
    let client = client();
    let token = login(&client, "teacher1", &test_password()).await;

    let mut tampered = token.clone();
    tampered.pop();

    let resp = client
        .get(format!("{}/me", base_url()))
        .bearer_auth(&tampered)
        .send()
        .await
        .expect("Failed to call /me");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Role Gate
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_student_on_developer_route_is_403_not_401() {
    let client = client();
    let token = login(&client, "student1", &test_password()).await;

    let resp = client
        .get(format!("{}/api/users", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to call /api/users");

    // Authenticated but unprivileged: forbidden, not a re-login prompt
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_teacher_on_developer_route_is_403() {
    let client = client();
    let token = login(&client, "teacher1", &test_password()).await;

    let resp = client
        .get(format!("{}/api/users", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to call /api/users");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_developer_can_list_users() {
    let client = client();
    let token = login(&client, "developer1", &test_password()).await;

    let resp = client
        .get(format!("{}/api/users", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to call /api/users");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse users");
    assert!(body.as_array().is_some_and(|users| !users.is_empty()));
}

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_student_sees_own_dashboard() {
    let client = client();
    let token = login(&client, "student1", &test_password()).await;

    let resp = client
        .get(format!("{}/api/students/me", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to call /api/students/me");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse dashboard");
    assert_eq!(body["username"], "student1");
}
