//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (workers >= 1, retention >= 1 day)
//! - Check addresses parse and the log level is a known severity
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig -> Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single semantic validation failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("runtime.workers must be at least 1")]
    NoWorkers,

    #[error("logging.level {0:?} is not one of trace/debug/info/warn/error")]
    InvalidLogLevel(String),

    #[error("logging.retention_days must be at least 1")]
    RetentionTooShort,

    #[error("logging.file_name must be a bare file name")]
    InvalidFileName,

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a deserialized configuration, collecting every failure.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.runtime.workers == 0 {
        errors.push(ValidationError::NoWorkers);
    }

    if config.logging.level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if config.logging.retention_days == 0 {
        errors.push(ValidationError::RetentionTooShort);
    }

    if config.logging.file_name.is_empty()
        || config.logging.file_name.contains('/')
        || config.logging.file_name.contains('\\')
    {
        errors.push(ValidationError::InvalidFileName);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
