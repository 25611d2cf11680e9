//! The session state machine.
//!
//! # Responsibilities
//! - Encode the greeting → status → currentsong → close exchange
//! - Produce exactly one outcome per started session
//! - Absorb connection errors and closures into outcomes, never panics
//!
//! # Design Decisions
//! - Transitions are pure: `(state, event) → effects`, independent of the
//!   concurrency primitive driving them
//! - Unexpected data in Idle/Done is ignored (spurious events are no-ops)
//! - A closure mid-exchange delivers an error outcome, so no caller hangs

use serde::Serialize;

use crate::protocol::{parse_greeting, parse_response, Command, Record};

/// Where the session currently stands in the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session in flight.
    Idle,
    /// Connected, waiting for the daemon's `OK MPD <version>` line.
    AwaitingGreeting,
    /// `status` sent, waiting for its response block.
    AwaitingStatus,
    /// `currentsong` sent, waiting for its response block.
    AwaitingSong,
    /// Outcome delivered, waiting for the connection to go away.
    Done,
}

/// What the connection reported to the machine.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// One complete block of response lines (terminator included).
    Data(Vec<String>),
    /// The connection failed.
    ConnectionError(String),
    /// The connection was closed.
    ConnectionClosed,
}

/// What the driver must do after a transition, in order.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Write a command to the backend.
    Send(Command),
    /// Tear down the connection.
    CloseConnection,
    /// Hand the outcome to the pending caller.
    Deliver(SessionOutcome),
}

/// Combined result of one successful session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerReport {
    /// Parsed `status` block.
    pub status: Record,
    /// Parsed `currentsong` block.
    #[serde(rename = "currentSong")]
    pub current_song: Record,
}

/// Ways a session can fail. All variants are terminal for the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("failed to connect to mpd: {0}")]
    Connect(String),
    #[error("mpd connection error: {0}")]
    Connection(String),
    #[error("unexpected greeting from mpd: {0:?}")]
    Greeting(String),
    #[error("mpd connection closed before a result was delivered")]
    Closed,
    #[error("mpd session timed out")]
    Timeout,
}

/// Exactly one outcome is produced per started session.
pub type SessionOutcome = Result<PlayerReport, SessionError>;

/// The state machine for one greeting → status → currentsong → close
/// exchange. Owns the data assembled along the way; I/O is the caller's job.
#[derive(Debug, Default)]
pub struct SessionMachine {
    state: SessionState,
    version: Option<String>,
    status: Option<Record>,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, for the driver's read strategy and for tests.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Daemon version recorded from the greeting, if seen.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Begin a session. Clears any data left from a previous one.
    pub fn start(&mut self) {
        self.state = SessionState::AwaitingGreeting;
        self.version = None;
        self.status = None;
    }

    /// Advance the machine by one event, returning the effects to execute.
    pub fn on_event(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::Data(lines) => self.on_data(lines),
            SessionEvent::ConnectionError(message) => self.on_error(message),
            SessionEvent::ConnectionClosed => self.on_closed(),
        }
    }

    fn on_data(&mut self, lines: Vec<String>) -> Vec<Effect> {
        match self.state {
            SessionState::AwaitingGreeting => {
                let first = lines.first().map(String::as_str).unwrap_or_default();
                match parse_greeting(first) {
                    Some(version) => {
                        tracing::info!(version = %version, "mpd responded");
                        self.version = Some(version.to_string());
                        self.state = SessionState::AwaitingStatus;
                        vec![Effect::Send(Command::Status)]
                    }
                    None => {
                        tracing::warn!(line = %first, "Unexpected greeting, aborting session");
                        self.state = SessionState::Idle;
                        vec![
                            Effect::CloseConnection,
                            Effect::Deliver(Err(SessionError::Greeting(first.to_string()))),
                        ]
                    }
                }
            }
            SessionState::AwaitingStatus => {
                tracing::debug!("Received status");
                self.status = Some(parse_response(&lines));
                self.state = SessionState::AwaitingSong;
                vec![Effect::Send(Command::CurrentSong)]
            }
            SessionState::AwaitingSong => {
                tracing::debug!("Received current song");
                let report = PlayerReport {
                    status: self.status.take().unwrap_or_default(),
                    current_song: parse_response(&lines),
                };
                self.state = SessionState::Done;
                vec![Effect::Send(Command::Close), Effect::Deliver(Ok(report))]
            }
            // Spurious data outside an exchange step is a no-op.
            SessionState::Idle | SessionState::Done => Vec::new(),
        }
    }

    fn on_error(&mut self, message: String) -> Vec<Effect> {
        let in_flight = self.in_flight();
        self.state = SessionState::Idle;

        if in_flight {
            vec![
                Effect::CloseConnection,
                Effect::Deliver(Err(SessionError::Connection(message))),
            ]
        } else {
            Vec::new()
        }
    }

    fn on_closed(&mut self) -> Vec<Effect> {
        let in_flight = self.in_flight();
        self.state = SessionState::Idle;
        tracing::info!("Connection to mpd closed");

        // A closure before delivery must still terminate the session with a
        // result; a silent reset would leave the caller hanging.
        if in_flight {
            vec![Effect::Deliver(Err(SessionError::Closed))]
        } else {
            Vec::new()
        }
    }

    fn in_flight(&self) -> bool {
        matches!(
            self.state,
            SessionState::AwaitingGreeting | SessionState::AwaitingStatus | SessionState::AwaitingSong
        )
    }
}
