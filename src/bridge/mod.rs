//! Request bridge between HTTP callers and backend sessions.
//!
//! # Data Flow
//! ```text
//! GET /status handler
//!     → StatusBridge::handle_status
//!     → pending slot claimed (or Busy rejection)
//!     → one SessionDriver spawned
//!     → outcome delivered through the slot's oneshot
//!     → handler encodes JSON + status code
//! ```
//!
//! # Design Decisions
//! - At most one session in flight; overlapping requests are rejected as
//!   busy rather than silently replacing the earlier caller
//! - Delivery takes the slot first, so a late or duplicate delivery finds
//!   it empty and is a no-op
//! - The slot lock is held only to set or take the sender, never across an
//!   await point

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::config::{MpdConfig, TimeoutConfig};
use crate::session::{PlayerReport, SessionDriver, SessionError, SessionOutcome};

/// Failures surfaced to the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A session is already in flight for another caller.
    #[error("a status request is already in flight")]
    Busy,
    /// The backend session terminated with an error.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// The session task went away without delivering anything.
    #[error("session ended without delivering a result")]
    Dropped,
}

/// Bridges one inbound status request to one backend session.
pub struct StatusBridge {
    mpd: MpdConfig,
    timeouts: TimeoutConfig,
    /// The single pending caller slot. Occupied while a session is in
    /// flight; taken (cleared) at delivery.
    pending: Mutex<Option<oneshot::Sender<SessionOutcome>>>,
}

impl StatusBridge {
    pub fn new(mpd: MpdConfig, timeouts: TimeoutConfig) -> Self {
        Self {
            mpd,
            timeouts,
            pending: Mutex::new(None),
        }
    }

    /// Whether a session is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.lock_slot().is_some()
    }

    /// Run one status exchange for the calling request.
    ///
    /// Rejects with [`BridgeError::Busy`] while another caller's session is
    /// in flight.
    pub async fn handle_status(self: Arc<Self>) -> Result<PlayerReport, BridgeError> {
        let rx = self.claim_slot()?;

        let driver = SessionDriver::new(self.mpd.clone(), self.timeouts.clone());
        let bridge = Arc::clone(&self);
        tokio::spawn(async move {
            let outcome = driver.run().await;
            bridge.deliver(outcome);
        });

        match rx.await {
            Ok(outcome) => outcome.map_err(BridgeError::Session),
            Err(_) => Err(BridgeError::Dropped),
        }
    }

    /// Occupy the pending slot for a new caller.
    fn claim_slot(&self) -> Result<oneshot::Receiver<SessionOutcome>, BridgeError> {
        let mut slot = self.lock_slot();
        if slot.is_some() {
            tracing::warn!("Rejecting status request, session already in flight");
            return Err(BridgeError::Busy);
        }

        let (tx, rx) = oneshot::channel();
        *slot = Some(tx);
        Ok(rx)
    }

    /// Deliver an outcome to the pending caller, if one is still waiting.
    ///
    /// Taking the sender clears the slot before sending, so a second call
    /// finds it empty and discards silently.
    fn deliver(&self, outcome: SessionOutcome) {
        let sender = self.lock_slot().take();

        match sender {
            Some(tx) => {
                // A send error only means the caller gave up waiting.
                let _ = tx.send(outcome);
            }
            None => {
                tracing::debug!("No pending caller for session outcome, discarding");
            }
        }
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<oneshot::Sender<SessionOutcome>>> {
        // The critical sections never panic; recover the guard anyway.
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge() -> Arc<StatusBridge> {
        Arc::new(StatusBridge::new(
            MpdConfig::default(),
            TimeoutConfig::default(),
        ))
    }

    #[test]
    fn claim_then_claim_again_is_busy() {
        let bridge = bridge();
        let _rx = bridge.claim_slot().expect("first claim succeeds");
        assert!(bridge.is_busy());
        assert!(matches!(bridge.claim_slot(), Err(BridgeError::Busy)));
    }

    #[tokio::test]
    async fn delivery_reaches_the_pending_caller_and_clears_the_slot() {
        let bridge = bridge();
        let rx = bridge.claim_slot().expect("claim succeeds");

        bridge.deliver(Ok(PlayerReport::default()));
        assert!(!bridge.is_busy());

        let outcome = rx.await.expect("outcome delivered");
        assert_eq!(outcome, Ok(PlayerReport::default()));
    }

    #[tokio::test]
    async fn duplicate_delivery_is_a_silent_no_op() {
        let bridge = bridge();
        let rx = bridge.claim_slot().expect("claim succeeds");

        bridge.deliver(Err(SessionError::Closed));
        // Slot is empty now; a late second delivery must not panic or
        // resurrect the session.
        bridge.deliver(Ok(PlayerReport::default()));

        assert_eq!(rx.await.expect("first outcome wins"), Err(SessionError::Closed));
    }

    #[tokio::test]
    async fn delivery_after_caller_gave_up_is_discarded() {
        let bridge = bridge();
        let rx = bridge.claim_slot().expect("claim succeeds");
        drop(rx);

        bridge.deliver(Ok(PlayerReport::default()));
        assert!(!bridge.is_busy());
    }

    #[tokio::test]
    async fn slot_frees_up_for_the_next_caller() {
        let bridge = bridge();
        let rx = bridge.claim_slot().expect("first claim");
        bridge.deliver(Ok(PlayerReport::default()));
        let _ = rx.await;

        assert!(bridge.claim_slot().is_ok());
    }
}
