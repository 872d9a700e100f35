//! Application router construction.
//!
//! Ships the operational surface of the algorithms backend: liveness,
//! readiness and service identity. Algorithm routes mount here as they land.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::http::server::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": "algorithms-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config.load();
    Json(json!({
        "status": "ready",
        "bind_address": config.listener.bind_address,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arc_swap::ArcSwap;
    use std::sync::Arc;
    use std::time::Instant;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    fn test_state() -> AppState {
        AppState {
            config: Arc::new(ArcSwap::from_pointee(ServerConfig::default())),
            started_at: Instant::now(),
        }
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let app = app(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/healthz")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readyz_reports_bind_address() {
        let app = app(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/readyz")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["bind_address"], "0.0.0.0:8000");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = app(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/algorithms/run")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
