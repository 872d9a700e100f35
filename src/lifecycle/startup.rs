//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Start background tasks (retention pruner, config watcher, metrics)
//! - Bind the listener and declare readiness before serving
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - The listener binds last; readiness is logged once the port is held,
//!   not after the blocking serve call returns

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Local;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{ConfigWatcher, ServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{metrics, retention};

/// Error type for fatal startup failures.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start config watcher: {0}")]
    Watcher(#[from] notify::Error),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bring the service up and serve until shutdown.
///
/// The log sink is already registered by the caller; everything here runs
/// under the worker runtime. Returns when the server has drained after a
/// shutdown signal, or with the first fatal error.
pub async fn run(
    config: ServerConfig,
    config_path: Option<PathBuf>,
    shutdown: Arc<Shutdown>,
) -> Result<(), StartupError> {
    let logging = config.logging.clone();
    let bind_address = config.listener.bind_address.clone();
    let reload = config.runtime.reload;
    let observability = config.observability.clone();
    let shared = Arc::new(ArcSwap::from_pointee(config));

    // Retention sweep before traffic. The sink already opened the
    // directory, so a failure here is unusual; log it and keep starting.
    let today = Local::now().date_naive();
    match retention::prune_rotated(
        Path::new(&logging.directory),
        &logging.file_name,
        logging.retention_days,
        today,
    ) {
        Ok(removed) if removed > 0 => {
            tracing::info!(removed, "Pruned expired log archives at startup");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Startup log retention sweep failed"),
    }
    retention::spawn_pruner(
        PathBuf::from(&logging.directory),
        logging.file_name.clone(),
        logging.retention_days,
        shutdown.subscribe(),
    );

    if observability.metrics_enabled {
        match observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Hot reload needs both the flag and a config file to watch.
    let (config_updates, _watcher) = match (reload, config_path) {
        (true, Some(path)) => {
            let (watcher, rx) = ConfigWatcher::new(&path);
            (rx, Some(watcher.run()?))
        }
        (true, None) => {
            tracing::debug!("Reload enabled but no config file given, hot reload inactive");
            (mpsc::unbounded_channel().1, None)
        }
        _ => (mpsc::unbounded_channel().1, None),
    };

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: bind_address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
        addr: bind_address.clone(),
        source,
    })?;

    // The port is held: declare readiness before the blocking serve call.
    tracing::info!(
        address = %local_addr,
        workers = shared.load().runtime.workers,
        "Algorithms backend server started successfully"
    );

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            signals::wait_for_signal().await;
            shutdown.trigger();
        });
    }

    HttpServer::new(shared)
        .run(listener, config_updates, shutdown.subscribe())
        .await?;

    Ok(())
}
