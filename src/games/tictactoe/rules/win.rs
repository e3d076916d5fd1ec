//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};
use tracing::instrument;

/// The 8 winning lines, in the order they are checked.
///
/// Rows top to bottom, then columns left to right, then the two diagonals.
/// When more than one line is complete the first one in this order decides
/// the winner.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first complete line, if any.
pub fn winning_line(board: &Board) -> Option<[Position; 3]> {
    WINNING_LINES.into_iter().find(|&[a, b, c]| {
        let sq = board.get(a);
        sq != Square::Empty && sq == board.get(b) && sq == board.get(c)
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a mark fills a winning line, `None` otherwise.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).and_then(|[a, _, _]| board.get(a).mark())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        board.set(Position::TopCenter, Square::Occupied(Mark::X));
        board.set(Position::TopRight, Square::Occupied(Mark::X));
        assert_eq!(check_winner(&board), Some(Mark::X));
    }

    #[test]
    fn test_winner_diagonal() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::O));
        board.set(Position::Center, Square::Occupied(Mark::O));
        board.set(Position::BottomRight, Square::Occupied(Mark::O));
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        board.set(Position::TopCenter, Square::Occupied(Mark::X));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in WINNING_LINES {
            for mark in [Mark::X, Mark::O] {
                let mut board = Board::new();
                for pos in line {
                    board.set(pos, Square::Occupied(mark));
                }
                assert_eq!(winning_line(&board), Some(line));
                assert_eq!(check_winner(&board), Some(mark));
            }
        }
    }

    #[test]
    fn test_row_reported_before_column() {
        let board: Board = "XXX X.. X..".parse().unwrap();
        assert_eq!(winning_line(&board), Some(WINNING_LINES[0]));
    }

    #[test]
    fn test_column_reported_before_diagonal() {
        let board: Board = "X.. XX. X.X".parse().unwrap();
        assert_eq!(winning_line(&board), Some(WINNING_LINES[3]));
    }

    #[test]
    fn test_upper_row_wins_between_two_marks() {
        // Unreachable in legal play; the first row in check order decides.
        let board: Board = "OOO XXX ...".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_left_column_wins_between_two_marks() {
        let board: Board = "OX. OX. OX.".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Mark::O));
    }
}
