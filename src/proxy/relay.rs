//! Pass-through relay
//!
//! Sends a prepared Procore request and hands its status, content type and
//! body back to the caller unchanged. Shared by every accident-log operation.

use axum::{
    body::Body,
    http::{self, header::CONTENT_TYPE},
    response::Response,
};
use tracing::{debug, error, warn};

use crate::error::{AppError, AppResult};

/// Execute `request` and rebuild Procore's answer as a client response
///
/// The upstream body is read in full before responding. Transport and
/// body-read failures both surface as `AppError::Upstream`.
pub async fn relay(request: reqwest::RequestBuilder, operation: &'static str) -> AppResult<Response> {
    let response = request.send().await.map_err(|e| {
        error!(operation, error = %e, timeout = e.is_timeout(), "Failed to reach Procore");
        AppError::Upstream(e.to_string())
    })?;

    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();

    let body = response.bytes().await.map_err(|e| {
        error!(operation, status = %status, error = %e, "Failed to read Procore response body");
        AppError::Upstream(e.to_string())
    })?;

    if status.is_success() {
        debug!(operation, status = %status, body_len = body.len(), "Relaying Procore response");
    } else {
        warn!(operation, status = %status, body_len = body.len(), "Procore returned non-success status");
    }

    let mut builder = http::Response::builder().status(status);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }

    builder
        .body(Body::from(body))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {}", e)))
}
