//! Opponent move selection.
//!
//! The stock opponent picks uniformly at random among the empty squares. It
//! performs no lookahead: it neither blocks the human's lines nor completes
//! its own. Any stronger player is a drop-in [`MoveSelector`]; nothing else
//! in the engine depends on how the square is chosen.

use super::action::EngineError;
use super::{Board, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Chooses a legal square for the computer player.
pub trait MoveSelector: Send {
    /// Returns an empty position on `board`.
    ///
    /// # Errors
    ///
    /// `EngineError::NoLegalMove` if the board is full.
    fn select(&mut self, board: &Board) -> Result<Position, EngineError>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Picks uniformly at random among the empty squares of `board`.
#[instrument(level = "trace", skip(rng))]
pub fn select_opponent_move<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Result<Position, EngineError> {
    board
        .empty_positions()
        .choose(rng)
        .copied()
        .ok_or(EngineError::NoLegalMove)
}

/// Opponent that plays a uniformly random empty square.
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    name: String,
    rng: StdRng,
}

impl RandomOpponent {
    /// Creates an opponent seeded from OS entropy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an opponent whose choices are reproducible from `seed`.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoveSelector for RandomOpponent {
    fn select(&mut self, board: &Board) -> Result<Position, EngineError> {
        let position = select_opponent_move(board, &mut self.rng)?;
        debug!(opponent = %self.name, %position, "Opponent chose position");
        Ok(position)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Opponent that takes the first empty square in index order.
#[derive(Debug, Clone)]
pub struct FirstAvailable {
    name: String,
}

impl FirstAvailable {
    /// Creates a first-available opponent.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl MoveSelector for FirstAvailable {
    fn select(&mut self, board: &Board) -> Result<Position, EngineError> {
        Position::ALL
            .iter()
            .copied()
            .find(|&pos| board.is_empty(pos))
            .ok_or(EngineError::NoLegalMove)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
