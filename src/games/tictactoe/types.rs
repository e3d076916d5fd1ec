//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// A player's symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// Mark X.
    #[serde(alias = "x")]
    X,
    /// Mark O.
    #[serde(alias = "o")]
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// Error returned when a string does not name a mark.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown mark {:?} (expected X or O)", input)]
pub struct ParseMarkError {
    /// The rejected input.
    #[error(not(source))]
    pub input: String,
}

impl FromStr for Mark {
    type Err = ParseMarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Mark::X),
            "o" | "O" => Ok(Mark::O),
            other => Err(ParseMarkError {
                input: other.to_string(),
            }),
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from its squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns every empty position, in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::iter().filter(|pos| self.is_empty(*pos)).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Error returned when parsing a board from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    /// The text did not contain exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// A cell character was not `X`, `O`, `.` or `_`.
    #[display("Invalid cell character {:?}", _0)]
    InvalidCell(#[error(not(source))] char),
}

/// Parses nine cells in row-major order, ignoring whitespace.
///
/// `X`/`O` (either case) are marks; `.` and `_` are empty.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'x' | 'X' => Ok(Square::Occupied(Mark::X)),
                'o' | 'O' => Ok(Square::Occupied(Mark::O)),
                '.' | '_' => Ok(Square::Empty),
                other => Err(ParseBoardError::InvalidCell(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let squares: [Square; 9] = cells
            .as_slice()
            .try_into()
            .map_err(|_| ParseBoardError::WrongLength(cells.len()))?;
        Ok(Self { squares })
    }
}
