//! Delayed, cancellable delivery of the opponent's reply.
//!
//! The pause before the computer moves is pacing for the human, not part of
//! the game rules. A [`ReplyTimer`] owns at most one pending delivery; it is
//! aborted when a new one is scheduled, when [`ReplyTimer::cancel`] is called,
//! and when the timer is dropped.

use crate::session::ReplyTicket;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Handle to the pending opponent reply, if any.
#[derive(Debug, Default)]
pub struct ReplyTimer {
    pending: Option<JoinHandle<()>>,
}

impl ReplyTimer {
    /// Creates an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends `ticket` on `sender` after `delay`, replacing any pending send.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self, sender))]
    pub fn schedule(
        &mut self,
        ticket: ReplyTicket,
        delay: Duration,
        sender: mpsc::UnboundedSender<ReplyTicket>,
    ) {
        self.cancel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(ticket).is_err() {
                debug!("Reply receiver dropped before delivery");
            }
        });
        self.pending = Some(handle);
    }

    /// Aborts the pending send. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                if waiting {
                    debug!("Pending opponent reply cancelled");
                }
                waiting
            }
            None => false,
        }
    }

    /// Returns true while a send is scheduled but not yet delivered.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ReplyTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
