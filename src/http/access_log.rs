//! Access logging middleware.
//!
//! One INFO line per handled request, carrying the request ID injected by
//! the request-id layer. The `logging.access_log` flag is read through the
//! shared config on every request, so a hot reload can silence or restore
//! access logs without a restart. Metrics are recorded unconditionally.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::server::AppState;
use crate::observability::metrics;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

pub async fn access_log(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let response = next.run(request).await;
    let status = response.status().as_u16();

    metrics::record_request(method.as_str(), status, started);

    if state.config.load().logging.access_log {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );
    }

    response
}
