//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via ArcSwap with the HTTP server
//!
//! When runtime.reload is enabled:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of Arc<ServerConfig>
//!     → subsystems observe new config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults so the binary runs with no config file
//! - Validation separates syntactic (serde) from semantic checks
//! - Changes to the bind address or worker count need a restart and are
//!   logged as such when observed by the reload path

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, LoggingConfig, ObservabilityConfig, RuntimeConfig, ServerConfig, TimeoutConfig,
};
pub use watcher::ConfigWatcher;
