//! Tic-tac-toe game engine.

mod action;
mod engine;
mod opponent;
mod position;
pub mod rules;
mod types;

pub use action::{EngineError, InvalidMove, Move};
pub use engine::{GameState, GameStatus, reset_game};
pub use opponent::{FirstAvailable, MoveSelector, RandomOpponent, select_opponent_move};
pub use position::Position;
pub use rules::check_termination;
pub use types::{Board, Mark, ParseBoardError, ParseMarkError, Square};
