//! Application boundary.
//!
//! The server runtime is pointed at [`bootstrap::app`], which assembles the
//! application router. Everything the bootstrapper knows about the
//! application is this one constructor.

pub mod bootstrap;
