//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so the binary runs with no config file at all.

use serde::{Deserialize, Serialize};

/// Root configuration for the algorithms backend server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Runtime configuration (worker count, hot reload).
    pub runtime: RuntimeConfig,

    /// Log sink configuration (file, rotation, retention).
    pub logging: LoggingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Number of worker threads for the async runtime.
    pub workers: usize,

    /// Watch the config file and apply changes without a restart.
    pub reload: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            reload: true,
        }
    }
}

/// Log sink configuration.
///
/// Records land in `<directory>/<file_name>.YYYY-MM-DD`; rotation switches
/// to a fresh file each day and files older than `retention_days` are
/// pruned.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory holding the active log file and its rotated archives.
    pub directory: String,

    /// Base name of the log file.
    pub file_name: String,

    /// Minimum severity written to the sink (trace, debug, info, warn, error).
    pub level: String,

    /// Days to keep rotated archives before pruning.
    pub retention_days: u32,

    /// Log one line per handled HTTP request.
    pub access_log: bool,

    /// Mirror log output to stdout in addition to the file sink.
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "../logs".to_string(),
            file_name: "algorithms.log".to_string(),
            level: "info".to_string(),
            retention_days: 30,
            access_log: true,
            stdout: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment_values() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.runtime.workers, 1);
        assert!(config.runtime.reload);
        assert_eq!(config.logging.file_name, "algorithms.log");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.retention_days, 30);
        assert!(config.logging.access_log);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [logging]
            retention_days = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.logging.retention_days, 7);
        assert_eq!(config.logging.file_name, "algorithms.log");
        assert_eq!(config.runtime.workers, 1);
    }
}
