//! Accident log endpoints
//!
//! Each handler validates its own inputs, then delegates to `ProcoreClient`,
//! whose responses are relayed back untouched. The `Authorization` header has
//! already been checked by `require_authorization`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Extension,
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    middleware::auth::ForwardedAuthorization,
    procore::{AccidentLog, DateRangeQuery},
    routes::metrics::record_request,
    AppState,
};

/// List all accident logs of the configured project
#[utoipa::path(
    get,
    path = "/api/accident-logs",
    tag = "Accident Logs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Procore's response, relayed unchanged", body = [AccidentLog]),
        (status = 401, description = "Missing Authorization header", body = ErrorResponse),
        (status = 500, description = "Upstream request failed", body = ErrorResponse)
    )
)]
pub async fn list_accident_logs(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<ForwardedAuthorization>,
) -> AppResult<Response> {
    let start_time = Instant::now();

    let result = state.procore.list_accident_logs(&auth.0).await;

    finish("list_accident_logs", start_time, result)
}

/// List accident logs between `from_date` and `to_date` (inclusive)
///
/// At least one bound is required.
#[utoipa::path(
    get,
    path = "/api/accident-logs/filter",
    tag = "Accident Logs",
    security(("bearer_auth" = [])),
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Procore's response, relayed unchanged", body = [AccidentLog]),
        (status = 400, description = "Neither date bound supplied", body = ErrorResponse),
        (status = 401, description = "Missing Authorization header", body = ErrorResponse),
        (status = 500, description = "Upstream request failed", body = ErrorResponse)
    )
)]
pub async fn list_filtered_accident_logs(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<ForwardedAuthorization>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Response> {
    let start_time = Instant::now();

    let range = query.into_range().ok_or_else(|| {
        AppError::BadRequest("At least one date parameter is required".to_string())
    })?;

    let result = state
        .procore
        .list_accident_logs_in_range(&auth.0, &range)
        .await;

    finish("list_filtered_accident_logs", start_time, result)
}

/// Create an accident log
#[utoipa::path(
    post,
    path = "/api/accident-logs",
    tag = "Accident Logs",
    security(("bearer_auth" = [])),
    request_body = AccidentLog,
    responses(
        (status = 201, description = "Procore's response, relayed unchanged", body = AccidentLog),
        (status = 400, description = "Body does not describe an accident log", body = ErrorResponse),
        (status = 401, description = "Missing Authorization header", body = ErrorResponse),
        (status = 500, description = "Upstream request failed", body = ErrorResponse)
    )
)]
pub async fn create_accident_log(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<ForwardedAuthorization>,
    body: Bytes,
) -> AppResult<Response> {
    let start_time = Instant::now();

    let log: AccidentLog = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Invalid accident log body");
        AppError::BadRequest(format!("Invalid request body: {}", e))
    })?;

    let result = state.procore.create_accident_log(&auth.0, &log).await;

    finish("create_accident_log", start_time, result)
}

/// Delete an accident log by id
#[utoipa::path(
    delete,
    path = "/api/accident-logs/{id}",
    tag = "Accident Logs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Procore accident log id")),
    responses(
        (status = 200, description = "Procore's response, relayed unchanged"),
        (status = 400, description = "Empty log id", body = ErrorResponse),
        (status = 401, description = "Missing Authorization header", body = ErrorResponse),
        (status = 500, description = "Upstream request failed", body = ErrorResponse)
    )
)]
pub async fn delete_accident_log(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<ForwardedAuthorization>,
    Path(log_id): Path<String>,
) -> AppResult<Response> {
    let start_time = Instant::now();

    if log_id.trim().is_empty() {
        return Err(AppError::BadRequest("Log ID is required".to_string()));
    }

    let result = state.procore.delete_accident_log(&auth.0, &log_id).await;

    finish("delete_accident_log", start_time, result)
}

/// Record metrics for a relayed call and pass the result through
fn finish(
    operation: &'static str,
    start_time: Instant,
    result: AppResult<Response>,
) -> AppResult<Response> {
    let duration = start_time.elapsed().as_secs_f64();
    let status = match &result {
        Ok(response) => response.status(),
        Err(e) => e.status_and_code().0,
    };

    record_request(operation, status, duration);

    info!(
        operation,
        status = %status,
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Relayed request completed"
    );

    result
}
