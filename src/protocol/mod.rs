//! Backend wire protocol subsystem.
//!
//! # Data Flow
//! ```text
//! Raw bytes from the mpd socket
//!     → split on '\n' into lines
//!     → parser.rs (greeting match, key/value response blocks)
//!     → Record handed to the session state machine
//!
//! Outbound:
//!     command.rs (status / currentsong / close)
//!     → encoded as "<command>\n" on the socket
//! ```
//!
//! # Design Decisions
//! - Responses are terminated by a line reading exactly "OK"
//! - Unrecognized lines are skipped, never fatal (forward compatibility)
//! - One command outstanding at a time; the protocol is never pipelined

pub mod command;
pub mod parser;

pub use command::Command;
pub use parser::{parse_greeting, parse_response, Record, TERMINATOR};
