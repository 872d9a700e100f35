//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, file sink + stdout mirror)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log file, rotated daily, pruned by retention.rs
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - One line format shared by file and stdout sinks
//! - The sink is an explicit handle flushed on shutdown, not process-exit
//!   cleanup
//! - Metrics are optional and off by default

pub mod logging;
pub mod metrics;
pub mod retention;

pub use logging::{init as init_logging, LogHandle, LoggingError};
