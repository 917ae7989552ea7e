//! Prometheus metrics endpoint
//!
//! Exposes per-operation relay counters and latencies in Prometheus format.

use axum::{http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    let _ = &*PROMETHEUS_HANDLE;

    metrics::describe_counter!(
        "relay_requests_total",
        "Total number of requests handled, by operation and status class"
    );
    metrics::describe_histogram!(
        "relay_request_duration_seconds",
        "Time spent handling a request, upstream round trip included"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Status class label, e.g. `2xx`
pub fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

/// Record a handled request
///
/// Without an installed recorder (tests, tools) this is a no-op.
pub fn record_request(operation: &'static str, status: StatusCode, duration_secs: f64) {
    metrics::counter!(
        "relay_requests_total",
        "operation" => operation,
        "status" => status_class(status)
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "operation" => operation)
        .record(duration_secs);
}
