//! Async driver for one backend session.
//!
//! # Responsibilities
//! - Open the TCP connection to the daemon (one per session)
//! - Read line blocks and feed them to the state machine as events
//! - Execute effects: write commands, tear down, surface the outcome
//! - Enforce connect and whole-session timeouts
//!
//! # Design Decisions
//! - The greeting is a single line; command responses run through the
//!   terminator line
//! - A timed-out session yields a Timeout outcome and drops the connection
//! - Timeout errors are distinct from other connection errors

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::{MpdConfig, TimeoutConfig};
use crate::observability::metrics;
use crate::protocol::TERMINATOR;
use crate::session::machine::{
    Effect, SessionError, SessionEvent, SessionMachine, SessionOutcome, SessionState,
};

/// Drives one complete exchange against the backend daemon.
pub struct SessionDriver {
    mpd: MpdConfig,
    timeouts: TimeoutConfig,
}

impl SessionDriver {
    pub fn new(mpd: MpdConfig, timeouts: TimeoutConfig) -> Self {
        Self { mpd, timeouts }
    }

    /// Run the session to completion under the session timeout.
    ///
    /// Never returns an unabsorbed I/O error: every failure mode ends up as
    /// a [`SessionOutcome`].
    pub async fn run(&self) -> SessionOutcome {
        let budget = Duration::from_secs(self.timeouts.session_secs);
        let outcome = match timeout(budget, self.drive()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    address = %self.mpd.address(),
                    budget_secs = self.timeouts.session_secs,
                    "Session timed out"
                );
                Err(SessionError::Timeout)
            }
        };

        metrics::record_session(&outcome);
        outcome
    }

    async fn drive(&self) -> SessionOutcome {
        let addr = self.mpd.address();
        tracing::debug!(address = %addr, "Connecting to mpd");

        let connect = TcpStream::connect(&addr);
        let stream = match timeout(Duration::from_secs(self.timeouts.connect_secs), connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(SessionError::Connect(e.to_string())),
            Err(_) => {
                return Err(SessionError::Connect(format!(
                    "connection to {} timed out",
                    addr
                )))
            }
        };
        tracing::debug!(address = %addr, "Connected to mpd");

        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half).lines();

        let mut machine = SessionMachine::new();
        machine.start();

        loop {
            let event = next_event(&mut reader, machine.state()).await;

            for effect in machine.on_event(event) {
                match effect {
                    Effect::Send(cmd) => {
                        tracing::debug!(command = %cmd, "Requesting");
                        if let Err(e) = write_half.write_all(cmd.wire().as_bytes()).await {
                            if !cmd.expects_response() {
                                // The goodbye is fire-and-forget; a failed
                                // write cannot fail a session that already
                                // has its result.
                                tracing::debug!(error = %e, "Goodbye write failed");
                                continue;
                            }
                            // The write failed underneath us; the machine
                            // turns it into the terminal outcome.
                            for effect in
                                machine.on_event(SessionEvent::ConnectionError(e.to_string()))
                            {
                                if let Effect::Deliver(outcome) = effect {
                                    return outcome;
                                }
                            }
                            return Err(SessionError::Connection(e.to_string()));
                        }
                    }
                    Effect::CloseConnection => {
                        // Dropping the halves on return closes the socket.
                    }
                    Effect::Deliver(outcome) => return outcome,
                }
            }

            // The machine reset without delivering (spurious event stream);
            // terminate rather than spin on a dead connection.
            if machine.state() == SessionState::Idle {
                return Err(SessionError::Closed);
            }
        }
    }
}

/// Read the next complete event from the connection.
///
/// In `AwaitingGreeting` a block is the single greeting line; afterwards a
/// block runs through the terminator line. EOF and read errors become their
/// own events so the machine decides what they mean.
async fn next_event(
    reader: &mut Lines<BufReader<OwnedReadHalf>>,
    state: SessionState,
) -> SessionEvent {
    let mut block = Vec::new();

    loop {
        match reader.next_line().await {
            Ok(Some(line)) => {
                let complete = state == SessionState::AwaitingGreeting || line == TERMINATOR;
                block.push(line);
                if complete {
                    return SessionEvent::Data(block);
                }
            }
            Ok(None) => return SessionEvent::ConnectionClosed,
            Err(e) => return SessionEvent::ConnectionError(e.to_string()),
        }
    }
}
