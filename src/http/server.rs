//! HTTP server setup and the status route.
//!
//! # Responsibilities
//! - Create the Axum Router with the single `/status` handler
//! - Wire up middleware (tracing, request timeout)
//! - Bind the server to a listener and serve with graceful shutdown
//! - Hand requests to the bridge and encode the outcome

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, State},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::bridge::{BridgeError, StatusBridge};
use crate::config::BridgeConfig;
use crate::observability::metrics;
use crate::session::PlayerReport;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<StatusBridge>,
}

/// HTTP server for the bridge.
pub struct BridgeServer {
    router: Router,
    config: BridgeConfig,
}

impl BridgeServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BridgeConfig) -> Self {
        let bridge = Arc::new(StatusBridge::new(
            config.mpd.clone(),
            config.timeouts.clone(),
        ));
        let state = AppState { bridge };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/status", get(status_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once the shutdown signal fires and in-flight requests have
    /// drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mpd_address = %self.config.mpd.address(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

/// The one route: trigger a backend session and report its outcome.
async fn status_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Result<Json<PlayerReport>, BridgeError> {
    let start = Instant::now();
    tracing::info!(peer_addr = %peer, "GET /status");

    let result = Arc::clone(&state.bridge).handle_status().await;

    let status = match &result {
        Ok(_) => axum::http::StatusCode::OK,
        Err(e) => e.status_code(),
    };
    metrics::record_request(status.as_u16(), start);

    result.map(Json)
}
