//! HTTP bridge to the Music Player Daemon's line protocol.

pub mod bridge;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod protocol;
pub mod session;

pub use bridge::StatusBridge;
pub use config::schema::BridgeConfig;
pub use http::BridgeServer;
pub use lifecycle::Shutdown;
