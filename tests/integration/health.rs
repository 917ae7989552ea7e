//! Health and docs endpoint integration tests
//!
//! - GET /health - Status with version and uptime
//! - GET /health/ready - Readiness probe
//! - GET /health/live - Liveness probe
//! - GET /docs/openapi.json - OpenAPI document

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::Value;

use crate::common::{test_config, RelayTestHarness};

#[tokio::test]
async fn test_health_endpoint_returns_proper_structure() {
    let harness = RelayTestHarness::new().await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["timestamp"].is_string());
    assert!(body.get("missing_settings").is_none());
}

#[tokio::test]
async fn test_health_reports_degraded_with_missing_settings() {
    let harness = RelayTestHarness::with_config(|procore| {
        let mut config = test_config(procore);
        config.company_id = String::new();
        config
    })
    .await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["missing_settings"][0], "PROCORE_COMPANY_ID");
}

#[tokio::test]
async fn test_probes_are_healthy() {
    let harness = RelayTestHarness::new().await;

    for path in ["/health/ready", "/health/live"] {
        let response = harness.server.get(path).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }
}

#[tokio::test]
async fn test_docs_hidden_when_key_configured() {
    let harness = RelayTestHarness::with_config(|procore| {
        let mut config = test_config(procore);
        config.docs_api_key = Some("docs-secret".to_string());
        config
    })
    .await;

    harness
        .server
        .get("/docs/openapi.json")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    harness
        .server
        .get("/docs/openapi.json")
        .add_header(
            HeaderName::from_static("x-docs-key"),
            HeaderValue::from_static("docs-secret"),
        )
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let harness = RelayTestHarness::new().await;

    harness
        .server
        .get("/api/unknown")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
