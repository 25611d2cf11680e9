//! Backend session subsystem.
//!
//! # Data Flow
//! ```text
//! StatusBridge starts a session
//!     → driver.rs (connect, read line blocks, write commands)
//!     → machine.rs (pure transitions: state + event → effects)
//!     → SessionOutcome delivered back through the bridge
//!
//! Session States:
//!     Idle → AwaitingGreeting → AwaitingStatus → AwaitingSong → Done → Idle
//! ```
//!
//! # Design Decisions
//! - The machine is a pure transition function; all I/O lives in the driver
//! - One connection per session; recovery is "drop everything and reconnect"
//! - Every started session terminates with exactly one outcome
//! - The whole exchange runs under a per-session timeout

pub mod driver;
pub mod machine;

pub use driver::SessionDriver;
pub use machine::{
    Effect, PlayerReport, SessionError, SessionEvent, SessionMachine, SessionOutcome, SessionState,
};
