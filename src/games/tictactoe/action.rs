//! Moves and the errors raised when they are rejected.

use super::{Mark, Position};
use derive_more::{Display, Error, From};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The position where the mark is placed.
    pub position: Position,
    /// The mark being placed.
    pub mark: Mark,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The cell index is outside 0..=8.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    OutOfRange(#[error(not(source))] isize),

    /// The target cell already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(#[error(not(source))] Position),

    /// The mark is not the one expected to move.
    #[display("It's not {}'s turn", _0)]
    OutOfTurn(#[error(not(source))] Mark),
}

/// Errors raised by the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum EngineError {
    /// The move was refused; the state is unchanged.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),

    /// A move was requested on a board with no empty cell.
    #[display("No legal move available")]
    #[from(ignore)]
    NoLegalMove,
}
