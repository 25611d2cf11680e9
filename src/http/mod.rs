//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, /status route)
//!     → bridge (one backend session per request)
//!     → response.rs (outcome → status code + JSON body)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - One route; everything else is Axum's 404 fallback
//! - Success and failure are distinguished by status code, not just body
//! - Request timeout enforced above the handler so a stuck session cannot
//!   hold the connection open

pub mod response;
pub mod server;

pub use server::BridgeServer;
