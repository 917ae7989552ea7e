//! Header utilities for Procore requests
//!
//! Relayed calls carry exactly two headers of our own: the caller's
//! `Authorization` value, forwarded verbatim, and the configured company id.

use axum::http::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::header::HeaderMap;

use crate::error::{AppError, AppResult};

/// Company scoping header required by every project resource
pub const COMPANY_ID_HEADER: HeaderName = HeaderName::from_static("procore-company-id");

/// Build the header set for an authenticated Procore call
pub fn build_upstream_headers(authorization: &HeaderValue, company_id: &str) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(AUTHORIZATION, authorization.clone());
    headers.insert(
        COMPANY_ID_HEADER,
        HeaderValue::from_str(company_id)
            .map_err(|e| AppError::Upstream(format!("Invalid company id header: {}", e)))?,
    );

    Ok(headers)
}
