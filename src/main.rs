//! Process entrypoint for the algorithms backend server.
//!
//! Startup order matters: configuration first, then the log sink, then the
//! worker runtime. Failures before the sink exists land on stderr; after
//! that, everything goes through tracing. Any startup error is fatal and
//! exits non-zero.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use algorithms_backend::config::{load_config, ServerConfig};
use algorithms_backend::lifecycle::{self, Shutdown};
use algorithms_backend::observability;

#[derive(Parser)]
#[command(name = "algorithms-backend")]
#[command(about = "Algorithms backend server", version)]
struct Cli {
    /// Path to the TOML config file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    let log_handle = observability::init_logging(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting algorithms backend server"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        workers = config.runtime.workers,
        reload = config.runtime.reload,
        log_level = %config.logging.level,
        access_log = config.logging.access_log,
        "Configuration loaded"
    );

    // Worker count maps to runtime worker threads, so the runtime is built
    // by hand instead of #[tokio::main].
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.runtime.workers)
        .enable_all()
        .build()?;

    let shutdown = Arc::new(Shutdown::new());
    let result = runtime.block_on(lifecycle::run_server(config, cli.config, shutdown));

    // Flush buffered records before the process exits.
    log_handle.shutdown();

    result?;
    Ok(())
}
