//! Authorization guard
//!
//! The relay never validates tokens itself; Procore does. This middleware only
//! makes sure a caller-supplied `Authorization` header exists before any
//! upstream call is attempted.

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument};

use crate::error::AppError;

/// Caller's `Authorization` header, forwarded to Procore verbatim
#[derive(Debug, Clone)]
pub struct ForwardedAuthorization(pub HeaderValue);

/// Return the `Authorization` header when present and non-empty
pub fn extract_authorization(headers: &HeaderMap) -> Option<&HeaderValue> {
    headers
        .get(header::AUTHORIZATION)
        .filter(|value| !value.as_bytes().iter().all(u8::is_ascii_whitespace))
}

/// Reject requests without an `Authorization` header
///
/// On success the header is stored as `ForwardedAuthorization` in the
/// request extensions.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn require_authorization(mut request: Request, next: Next) -> Result<Response, AppError> {
    let authorization = extract_authorization(request.headers())
        .cloned()
        .ok_or_else(|| {
            debug!("Rejecting request without Authorization header");
            AppError::Unauthorized
        })?;

    request
        .extensions_mut()
        .insert(ForwardedAuthorization(authorization));

    Ok(next.run(request).await)
}
