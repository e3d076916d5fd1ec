//! Entry point for front ends: taps in, transitions out.
//!
//! The controller owns the session and the reply timer together, so every
//! reset cancels the opponent reply scheduled for the game it replaces.

use crate::games::tictactoe::EngineError;
use crate::scheduler::ReplyTimer;
use crate::session::{GameSession, ReplyTicket, SessionError, Transition};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Drives a [`GameSession`] with a paced opponent.
#[derive(Debug)]
pub struct Controller {
    session: GameSession,
    timer: ReplyTimer,
    outstanding: Option<ReplyTicket>,
    reply_delay: Duration,
    replies: mpsc::UnboundedSender<ReplyTicket>,
}

impl Controller {
    /// Creates a controller and the channel its opponent replies arrive on.
    ///
    /// Feed every ticket received on the channel back to
    /// [`Controller::on_reply`].
    pub fn new(
        session: GameSession,
        reply_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ReplyTicket>) {
        let (replies, rx) = mpsc::unbounded_channel();
        let controller = Self {
            session,
            timer: ReplyTimer::new(),
            outstanding: None,
            reply_delay,
            replies,
        };
        (controller, rx)
    }

    /// Returns the session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns true from the human's move until the opponent's reply is
    /// applied, including while a delivered ticket waits in the channel.
    pub fn awaiting_reply(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Plays the human's mark at `cell` and schedules the opponent's reply.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn tap(&mut self, cell: isize) -> Result<Transition, EngineError> {
        let transition = self.session.human_move(cell).inspect_err(|err| {
            debug!(%err, "Tap ignored");
        })?;
        self.outstanding = *transition.reply();
        if let Some(ticket) = self.outstanding {
            self.timer
                .schedule(ticket, self.reply_delay, self.replies.clone());
        }
        Ok(transition)
    }

    /// Applies an opponent reply delivered by the timer.
    #[instrument(skip(self))]
    pub fn on_reply(&mut self, ticket: ReplyTicket) -> Result<Transition, SessionError> {
        let result = self.session.opponent_move(ticket);
        if self.outstanding == Some(ticket) {
            self.outstanding = None;
        }
        result
    }

    /// Cancels any pending reply and starts a new game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        if self.timer.cancel() {
            info!("Reset during opponent delay");
        }
        self.outstanding = None;
        self.session.reset();
    }
}
