//! HTTP status bridge for the Music Player Daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                  MPD BRIDGE                   │
//!                    │                                               │
//!   GET /status      │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ bridge  │───▶│ session  │  │
//!                    │  │ server  │    │  slot   │    │  driver  │  │
//!                    │  └─────────┘    └─────────┘    └────┬─────┘  │
//!                    │                                     │        │
//!                    │                                     ▼        │
//!   JSON response    │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │     mpd
//!   ◀────────────────┼──│response │◀───│ oneshot │◀───│ protocol │◀─┼──── daemon
//!                    │  │encoding │    │delivery │    │  parser  │  │    (TCP)
//!                    │  └─────────┘    └─────────┘    └──────────┘  │
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns          │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                    │  │  │ config │ │observability│ │lifecycle│ │ │
//!                    │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! One session at a time drives the greeting → status → currentsong → close
//! exchange against the daemon; overlapping HTTP requests are rejected as
//! busy.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use mpd_bridge::config::{load_config, BridgeConfig};
use mpd_bridge::lifecycle::Shutdown;
use mpd_bridge::observability::{logging, metrics};
use mpd_bridge::BridgeServer;

#[derive(Debug, Parser)]
#[command(name = "mpd-bridge", about = "HTTP status bridge for the Music Player Daemon")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Fail fast: a broken config file must not start a half-working bridge.
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!("mpd-bridge v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listen.bind_address(),
        mpd_address = %config.mpd.address(),
        session_timeout_secs = config.timeouts.session_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(config.listen.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = BridgeServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
