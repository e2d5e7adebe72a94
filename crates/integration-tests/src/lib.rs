//! Integration tests for Hifz Tracker.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a database and run migrations
//! cargo run -p hifz-cli -- migrate
//!
//! # Seed demo accounts (the tests authenticate with these)
//! cargo run -p hifz-cli -- seed --password 'integration-pw-1'
//!
//! # Start the server
//! cargo run -p hifz-server
//!
//! # Run the ignored tests against it
//! cargo test -p hifz-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `HIFZ_BASE_URL` - Server base URL (default: `http://localhost:3000`)
//! - `HIFZ_TEST_PASSWORD` - Password for the seeded demo accounts
//!   (default: `integration-pw-1`)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)] // test helpers panic on wire errors by design

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("HIFZ_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Password for the seeded demo accounts.
#[must_use]
pub fn test_password() -> String {
    std::env::var("HIFZ_TEST_PASSWORD").unwrap_or_else(|_| "integration-pw-1".to_string())
}

/// Build a plain HTTP client.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in and return the raw response.
pub async fn login_response(client: &Client, username: &str, password: &str) -> reqwest::Response {
    client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send login request")
}

/// Log in and return the session token; panics on a rejected login.
pub async fn login(client: &Client, username: &str, password: &str) -> String {
    let resp = login_response(client, username, password).await;
    assert!(
        resp.status().is_success(),
        "login failed for {username}: {}",
        resp.status()
    );

    let body: Value = resp.json().await.expect("Failed to parse login response");
    body.get("token")
        .and_then(Value::as_str)
        .expect("login response carried no token")
        .to_string()
}
