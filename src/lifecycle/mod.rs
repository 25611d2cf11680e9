//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → init logging/metrics → bind listener → serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain in-flight → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast on startup: any config or bind error is fatal
//! - Shutdown is broadcast so tests can trigger it without a signal

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
