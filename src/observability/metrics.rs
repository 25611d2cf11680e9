//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): HTTP requests by status code
//! - `bridge_request_duration_seconds` (histogram): request latency
//! - `bridge_sessions_total` (counter): backend sessions by outcome
//!
//! # Design Decisions
//! - Recording is always on (cheap atomics); only the Prometheus endpoint
//!   is config-gated
//! - Session outcomes are labeled ok / timeout / error, not per error kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::session::{SessionError, SessionOutcome};

/// Start the Prometheus scrape endpoint.
///
/// Failure to bind is logged, not fatal: the bridge works without its
/// metrics endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one handled HTTP request.
pub fn record_request(status: u16, start: Instant) {
    counter!("bridge_requests_total", "status" => status.to_string()).increment(1);
    histogram!("bridge_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one completed backend session.
pub fn record_session(outcome: &SessionOutcome) {
    let label = match outcome {
        Ok(_) => "ok",
        Err(SessionError::Timeout) => "timeout",
        Err(_) => "error",
    };
    counter!("bridge_sessions_total", "outcome" => label).increment(1);
}
