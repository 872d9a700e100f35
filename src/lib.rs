//! Algorithms backend server library.
//!
//! The crate is a process bootstrapper: it registers a rotating, retained
//! file log sink, then launches the HTTP server at the configured address
//! and hands requests to the application router in [`api::bootstrap`].

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
