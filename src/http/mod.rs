//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → access_log.rs (request ID, access line, metrics)
//!     → api::bootstrap (application routes)
//!     → Send to client
//! ```

pub mod access_log;
pub mod server;

pub use access_log::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
