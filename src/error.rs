//! Error types for the relay
//!
//! Every failure path ends in an `AppError`, which renders as
//! `{"error": "<message>", "code": "<CODE>"}`. Clients read the message
//! straight from `error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authorization header is required")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The token request could not be constructed
    #[error("Failed to create token request: {0}")]
    TokenRequestBuild(String),

    /// The token request could not be sent or timed out
    #[error("Failed to get token from Procore: {0}")]
    TokenRequestFailed(String),

    #[error("Failed to read token response: {0}")]
    TokenResponseUnreadable(String),

    #[error("Failed to parse token response: {0}")]
    TokenResponseInvalid(String),

    /// Non-200 answer from the token endpoint, relayed with its own status
    #[error("Procore rejected the request with status {status}")]
    UpstreamRejected { status: StatusCode, body: String },

    /// Construction, transport or body-read failure on a relayed call
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message, or the upstream's raw payload for a rejection
    pub error: String,
    /// Machine-readable error code
    pub code: String,
}

impl AppError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::TokenRequestBuild(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_REQUEST_INVALID")
            }
            AppError::TokenRequestFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_REQUEST_FAILED")
            }
            AppError::TokenResponseUnreadable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_RESPONSE_UNREADABLE")
            }
            AppError::TokenResponseInvalid(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_RESPONSE_INVALID")
            }
            AppError::UpstreamRejected { status, .. } => (*status, "UPSTREAM_REJECTED"),
            AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::BadRequest(msg) => msg,
            // Upstream's own error payload, untouched
            AppError::UpstreamRejected { body, .. } => body,
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
