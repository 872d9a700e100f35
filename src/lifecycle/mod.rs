//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Pruner + metrics + watcher → bind listener → readiness log → serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain connections → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: background tasks first, listener last
//! - Readiness is declared after bind, before serving
//! - Config loading and log sink registration happen in main, before the
//!   runtime exists, so startup failures surface on stderr too

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run as run_server, StartupError};
