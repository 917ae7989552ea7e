//! HTTP routes for the relay
//!
//! This module defines all HTTP endpoints exposed by the relay.

pub mod accident_logs;
pub mod auth;
pub mod docs;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{middleware::auth::require_authorization, AppState};

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // The browser client is served from another origin. A wildcard never
    // covers Authorization in a preflight, so the headers are listed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Relayed routes; the Authorization header is checked before any handler runs
    let accident_log_routes = Router::new()
        .route(
            "/api/accident-logs",
            get(accident_logs::list_accident_logs).post(accident_logs::create_accident_log),
        )
        .route(
            "/api/accident-logs/filter",
            get(accident_logs::list_filtered_accident_logs),
        )
        .route(
            "/api/accident-logs/:id",
            delete(accident_logs::delete_accident_log),
        )
        .layer(middleware::from_fn(require_authorization));

    let auth_routes = Router::new()
        .route("/api/auth/token", post(auth::exchange_token))
        .route("/api/auth/url", get(auth::authorization_url));

    // Public routes (health checks, metrics) - no auth required
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(accident_log_routes)
        .merge(docs::create_docs_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
