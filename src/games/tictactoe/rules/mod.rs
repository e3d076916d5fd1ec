//! Game rules for tic-tac-toe.
//!
//! Pure functions of the board contents, kept apart from the state type so
//! they can be tested and reused on any board.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WINNING_LINES, check_winner, winning_line};

use super::{Board, GameStatus};
use tracing::instrument;

/// Classifies a board as won, drawn or still in progress.
///
/// Winning lines are checked before fullness, so a full board that
/// completes a line is a win, not a draw.
#[instrument(level = "trace")]
pub fn check_termination(board: &Board) -> GameStatus {
    if let Some(mark) = check_winner(board) {
        GameStatus::Won(mark)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
