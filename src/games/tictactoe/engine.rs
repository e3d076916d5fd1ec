//! Game state and the operations that advance it.

use super::action::{EngineError, InvalidMove, Move};
use super::rules::check_termination;
use super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game is won or drawn.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::Won(mark) => Some(mark),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(mark) => write!(f, "Winner: {}", mark),
            GameStatus::Draw => write!(f, "It's a draw!"),
        }
    }
}

/// Complete game state.
///
/// States are values: every accepted move produces a new state and leaves
/// the old one untouched. Once `status` is not `InProgress` the state is
/// terminal and refuses all moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    history: Vec<Move>,
}

impl GameState {
    /// Creates a fresh game where `first` moves first.
    pub fn new(first: Mark) -> Self {
        Self {
            board: Board::new(),
            current_mark: first,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark expected to move next.
    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the move placed most recently.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Places `mark` at a raw cell index.
    ///
    /// Negative and out-of-range indices are rejected the same way as an
    /// occupied cell. See [`GameState::place`].
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn apply_move(&self, cell: isize, mark: Mark) -> Result<GameState, EngineError> {
        if self.status.is_over() {
            return Err(InvalidMove::GameOver.into());
        }
        let position = Position::try_from(cell)?;
        self.place(position, mark)
    }

    /// Places `mark` at `position` and re-evaluates the status.
    ///
    /// Does not pass the turn; the caller decides who moves next
    /// (see [`GameState::pass_turn`]).
    ///
    /// # Errors
    ///
    /// `InvalidMove::GameOver` once the game is terminal and
    /// `InvalidMove::Occupied` if the square is taken. The receiver is never
    /// modified.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn place(&self, position: Position, mark: Mark) -> Result<GameState, EngineError> {
        if self.status.is_over() {
            return Err(InvalidMove::GameOver.into());
        }
        if !self.board.is_empty(position) {
            return Err(InvalidMove::Occupied(position).into());
        }

        let mut next = self.clone();
        next.board.set(position, Square::Occupied(mark));
        next.history.push(Move::new(position, mark));
        next.status = check_termination(&next.board);

        debug!(%position, %mark, status = ?next.status, "Move applied");
        Ok(next)
    }

    /// Hands the move to the other mark while the game is in progress.
    ///
    /// A terminal state is returned unchanged.
    pub fn pass_turn(mut self) -> Self {
        if !self.status.is_over() {
            self.current_mark = self.current_mark.opponent();
        }
        self
    }
}

/// Starts a brand-new game with an empty board.
///
/// `first` is the mark assigned to the human, who moves first by
/// convention. Nothing is carried over from earlier games.
#[instrument]
pub fn reset_game(first: Mark) -> GameState {
    GameState::new(first)
}
