//! OAuth endpoints
//!
//! Exchanges authorization codes for Procore access tokens and hands out the
//! consent URL. No token is stored; the caller keeps what it receives.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use bytes::Bytes;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    procore::{AccessTokenResponse, AuthorizationUrlResponse, TokenExchangeRequest},
    routes::metrics::record_request,
    AppState,
};

/// Exchange an authorization code for an access token
///
/// The refresh token returned by Procore is parsed but deliberately left
/// out of this response.
#[utoipa::path(
    post,
    path = "/api/auth/token",
    tag = "Auth",
    request_body = TokenExchangeRequest,
    responses(
        (status = 200, description = "Access token issued", body = AccessTokenResponse),
        (status = 400, description = "Malformed body or empty code", body = ErrorResponse),
        (status = 500, description = "Token request failed or response unreadable", body = ErrorResponse)
    )
)]
pub async fn exchange_token(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<AccessTokenResponse>> {
    let start_time = Instant::now();

    let result = exchange(&state, &body).await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_and_code().0,
    };
    record_request("exchange_token", status, start_time.elapsed().as_secs_f64());

    result.map(Json)
}

async fn exchange(state: &AppState, body: &[u8]) -> AppResult<AccessTokenResponse> {
    let request: TokenExchangeRequest = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Invalid token exchange body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    if request.code.is_empty() {
        return Err(AppError::BadRequest(
            "Authorization code is required".to_string(),
        ));
    }

    let token = state.procore.exchange_code(&request.code).await?;
    info!("Issued access token to client");

    Ok(AccessTokenResponse::from(token))
}

/// Consent URL for obtaining an authorization code
#[utoipa::path(
    get,
    path = "/api/auth/url",
    tag = "Auth",
    responses(
        (status = 200, description = "Procore consent URL", body = AuthorizationUrlResponse)
    )
)]
pub async fn authorization_url(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<AuthorizationUrlResponse>> {
    let url = state.procore.authorization_url()?;
    Ok(Json(AuthorizationUrlResponse { url }))
}
