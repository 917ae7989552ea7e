//! Token exchange integration tests
//!
//! Tests for the OAuth endpoints:
//! - POST /api/auth/token - Authorization code exchange
//! - GET /api/auth/url - Consent URL

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, decode_form, test_config, RelayTestHarness};

#[tokio::test]
async fn test_token_exchange_returns_access_token_without_refresh_token() {
    let harness = RelayTestHarness::new().await;
    harness
        .procore
        .mock_token_success(
            constants::TEST_AUTH_CODE,
            constants::TEST_ACCESS_TOKEN,
            constants::TEST_REFRESH_TOKEN,
        )
        .await;

    let response = harness
        .server
        .post("/api/auth/token")
        .json(&json!({ "code": constants::TEST_AUTH_CODE }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "access_token": constants::TEST_ACCESS_TOKEN,
            "token_type": "bearer",
            "expires_in": 5400
        })
    );
}

#[tokio::test]
async fn test_token_exchange_sends_expected_form() {
    let harness = RelayTestHarness::new().await;
    harness
        .procore
        .mock_token_success(
            constants::TEST_AUTH_CODE,
            constants::TEST_ACCESS_TOKEN,
            constants::TEST_REFRESH_TOKEN,
        )
        .await;

    harness
        .server
        .post("/api/auth/token")
        .json(&json!({ "code": constants::TEST_AUTH_CODE }))
        .await
        .assert_status_ok();

    let requests = harness.upstream_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/oauth/token");

    let mut form = decode_form(&requests[0].body);
    form.sort();
    let mut expected = vec![
        ("client_id".to_string(), constants::TEST_CLIENT_ID.to_string()),
        ("client_secret".to_string(), constants::TEST_CLIENT_SECRET.to_string()),
        ("code".to_string(), constants::TEST_AUTH_CODE.to_string()),
        ("grant_type".to_string(), "authorization_code".to_string()),
        ("redirect_uri".to_string(), "urn:ietf:wg:oauth:2.0:oob".to_string()),
    ];
    expected.sort();
    assert_eq!(form, expected);
}

#[tokio::test]
async fn test_token_exchange_rejects_empty_code_without_upstream_call() {
    let harness = RelayTestHarness::new().await;

    let response = harness
        .server
        .post("/api/auth/token")
        .json(&json!({ "code": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Authorization code is required");
    assert!(harness.upstream_requests().await.is_empty());
}

#[tokio::test]
async fn test_token_exchange_rejects_missing_code() {
    let harness = RelayTestHarness::new().await;

    let response = harness.server.post("/api/auth/token").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(harness.upstream_requests().await.is_empty());
}

#[tokio::test]
async fn test_token_exchange_rejects_malformed_body() {
    let harness = RelayTestHarness::new().await;

    let response = harness
        .server
        .post("/api/auth/token")
        .text("code=abc")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid request body");
    assert!(harness.upstream_requests().await.is_empty());
}

#[tokio::test]
async fn test_token_exchange_surfaces_upstream_rejection() {
    let harness = RelayTestHarness::new().await;
    harness
        .procore
        .mock_token_error(400, r#"{"error":"invalid_grant"}"#)
        .await;

    let response = harness
        .server
        .post("/api/auth/token")
        .json(&json!({ "code": "expired-code" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "error": r#"{"error":"invalid_grant"}"#,
            "code": "UPSTREAM_REJECTED"
        })
    );
}

#[tokio::test]
async fn test_token_exchange_treats_non_200_success_as_rejection() {
    let harness = RelayTestHarness::new().await;
    harness.procore.mock_token_error(201, "{}").await;

    let response = harness
        .server
        .post("/api/auth/token")
        .json(&json!({ "code": "abc" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["code"], "UPSTREAM_REJECTED");
}

#[tokio::test]
async fn test_token_exchange_unparseable_response() {
    let harness = RelayTestHarness::new().await;
    harness.procore.mock_token_error(200, "<html>oops</html>").await;

    let response = harness
        .server
        .post("/api/auth/token")
        .json(&json!({ "code": "abc" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "TOKEN_RESPONSE_INVALID");
}

#[tokio::test]
async fn test_token_exchange_transport_failure() {
    let harness = RelayTestHarness::with_config(|procore| {
        let mut config = test_config(procore);
        // Nothing listens on port 9 locally
        config.login_url = "http://127.0.0.1:9".to_string();
        config
    })
    .await;

    let response = harness
        .server
        .post("/api/auth/token")
        .json(&json!({ "code": "abc" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "TOKEN_REQUEST_FAILED");
}

#[tokio::test]
async fn test_token_exchange_times_out_against_hung_upstream() {
    let harness = RelayTestHarness::with_config(|procore| {
        let mut config = test_config(procore);
        config.token_timeout = Duration::from_millis(200);
        config
    })
    .await;
    harness.procore.mock_token_delayed(Duration::from_secs(5)).await;

    let started = Instant::now();
    let response = harness
        .server
        .post("/api/auth/token")
        .json(&json!({ "code": "abc" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "TOKEN_REQUEST_FAILED");
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_authorization_url_uses_configured_client() {
    let harness = RelayTestHarness::new().await;

    let response = harness.server.get("/api/auth/url").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with(&format!("{}/oauth/authorize?", harness.procore.uri())));
    assert!(url.contains(&format!("client_id={}", constants::TEST_CLIENT_ID)));
    assert!(url.contains("response_type=code"));
}
