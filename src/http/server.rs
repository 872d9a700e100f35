//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the Axum router from the application boundary
//! - Wire up middleware (request ID, timeout, access log)
//! - Serve on a bound listener with graceful shutdown
//! - Apply hot-reloaded configuration

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;

use crate::api;
use crate::config::ServerConfig;
use crate::http::access_log::{access_log, X_REQUEST_ID};

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Live configuration, swapped atomically on reload.
    pub config: Arc<ArcSwap<ServerConfig>>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

/// Request ID generator (UUID v4).
#[derive(Clone, Copy)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP server for the algorithms backend.
pub struct HttpServer {
    router: Router,
    config: Arc<ArcSwap<ServerConfig>>,
}

impl HttpServer {
    /// Create a new HTTP server around the shared configuration.
    pub fn new(config: Arc<ArcSwap<ServerConfig>>) -> Self {
        let state = AppState {
            config: config.clone(),
            started_at: Instant::now(),
        };
        let request_timeout = config.load().timeouts.request_secs;

        // Request ID is set outermost so the access log sees it.
        let router = api::bootstrap::app(state.clone()).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    HeaderName::from_static(X_REQUEST_ID),
                    UuidRequestId,
                ))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(request_timeout)))
                .layer(middleware::from_fn_with_state(state, access_log)),
        );

        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once the shutdown signal fires and in-flight requests have
    /// drained, or on a fatal I/O error.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServerConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let config = self.config.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                apply_reload(&config, new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Swap in a reloaded configuration, flagging fields that need a restart.
fn apply_reload(current: &ArcSwap<ServerConfig>, new_config: ServerConfig) {
    let active = current.load();

    if new_config.listener.bind_address != active.listener.bind_address {
        tracing::warn!(
            active = %active.listener.bind_address,
            requested = %new_config.listener.bind_address,
            "Bind address changed in config file; restart required to apply"
        );
    }
    if new_config.runtime.workers != active.runtime.workers {
        tracing::warn!("Worker count changed in config file; restart required to apply");
    }
    if new_config.timeouts.request_secs != active.timeouts.request_secs {
        tracing::warn!("Request timeout changed in config file; restart required to apply");
    }
    // The sink is registered once at startup; only access_log is live.
    if sink_settings_changed(&active.logging, &new_config.logging) {
        tracing::warn!("Log sink settings changed in config file; restart required to apply");
    }

    current.store(Arc::new(new_config));
    tracing::info!("Configuration reloaded");
}

/// True when a reload touched log sink fields that only apply at startup
/// (everything except the access-log flag).
fn sink_settings_changed(
    active: &crate::config::LoggingConfig,
    new: &crate::config::LoggingConfig,
) -> bool {
    active.level != new.level
        || active.directory != new.directory
        || active.file_name != new.file_name
        || active.retention_days != new.retention_days
        || active.stdout != new.stdout
}
