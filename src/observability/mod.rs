//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (request/session counters)
//!
//! Consumers:
//!     → stdout log lines (timestamped by the subscriber)
//!     → Prometheus scrape endpoint (optional, config-gated)
//! ```
//!
//! # Design Decisions
//! - Log level comes from config, overridable via RUST_LOG
//! - Metric updates are cheap (atomic increments); the exporter is optional

pub mod logging;
pub mod metrics;
