//! Session-scoped win counts.

use crate::games::tictactoe::{GameStatus, Mark};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Wins per mark for the lifetime of a session.
///
/// Survives game resets; lost when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    x: u32,
    o: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of wins for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Credits the winner of a finished game.
    ///
    /// Draws and unfinished games score nothing. Callers invoke this once per
    /// game, on the transition into `Won`.
    #[instrument(skip(self))]
    pub fn record(&mut self, status: GameStatus) {
        if let GameStatus::Won(mark) = status {
            let wins = match mark {
                Mark::X => &mut self.x,
                Mark::O => &mut self.o,
            };
            *wins += 1;
            info!(%mark, wins = *wins, "Win recorded");
        }
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {}  O: {}", self.x, self.o)
    }
}
