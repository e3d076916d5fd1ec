//! Keyboard mapping for the board.

use crossterm::event::KeyCode;
use tictactoe_duel::Position;

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, col + 1),
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => (row + 1, col),
        _ => (row, col),
    };
    Position::from_row_col(row, col).unwrap_or(cursor)
}

/// Maps the digits 1-9 to positions, numbered like the on-screen hints.
pub fn digit_position(c: char) -> Option<Position> {
    c.to_digit(10)
        .filter(|digit| (1..=9).contains(digit))
        .and_then(|digit| Position::from_index(digit as usize - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_board() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Down), Position::MiddleLeft);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Right), Position::BottomRight);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Down), Position::BottomRight);
    }

    #[test]
    fn test_digits() {
        assert_eq!(digit_position('1'), Some(Position::TopLeft));
        assert_eq!(digit_position('9'), Some(Position::BottomRight));
        assert_eq!(digit_position('0'), None);
        assert_eq!(digit_position('x'), None);
    }
}
