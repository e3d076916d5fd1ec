//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_duel::{Board, Cue, Mark, Position, Square, rules};

use super::app::App;

const CONFETTI: &str = "* . + ` * , . + * ` . , * + . ` *";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Score
            Constraint::Min(13),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    draw_score(frame, chunks[1], app);
    draw_board(frame, chunks[2], app);
    draw_status(frame, chunks[3], app);

    let help = Paragraph::new("1-9 or arrows + Enter: move   r: restart   q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_score(frame: &mut Frame, area: Rect, app: &App) {
    let score = app.controller().session().score();
    // Highlight the tally that just changed.
    let fresh = app.cues().iter().find_map(|cue| match cue {
        Cue::Victory(mark) => Some(*mark),
        _ => None,
    });
    let spans: Vec<Span> = [Mark::X, Mark::O]
        .into_iter()
        .flat_map(|mark| {
            let style = if fresh == Some(mark) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                mark_style(mark)
            };
            [
                Span::styled(format!("{}: {}", mark, score.wins(mark)), style),
                Span::raw("    "),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board = app.controller().session().state().board();
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], board, app, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, board: &Board, app: &App, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::from_row_col(row, col) {
            draw_cell(frame, cols[col * 2], board, app, pos);
        }
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, app: &App, pos: Position) {
    let (symbol, mut style) = match board.get(pos) {
        Square::Empty => (
            format!("{}", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(mark) => (mark.to_string(), mark_style(mark)),
    };

    let just_placed = app
        .cues()
        .iter()
        .any(|cue| matches!(cue, Cue::MoveAccepted(mv) if mv.position == pos));
    let on_winning_line = rules::winning_line(board).is_some_and(|line| line.contains(&pos));

    if on_winning_line {
        style = style.fg(Color::Green).add_modifier(Modifier::RAPID_BLINK);
    } else if just_placed {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if pos == app.cursor() {
        style = style.bg(Color::White).fg(Color::Black);
    }

    // Vertically centre the symbol in the 3-line cell.
    let text = vec![Line::raw(""), Line::from(Span::styled(symbol, style))];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let celebrating = app
        .cues()
        .iter()
        .any(|cue| matches!(cue, Cue::Victory(_) | Cue::Draw));

    let (text, style) = if celebrating {
        (
            format!("{}  {}  {}", CONFETTI, app.status_line(), CONFETTI),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )
    } else {
        (app.status_line(), Style::default().fg(Color::Yellow))
    };

    let status = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn mark_style(mark: Mark) -> Style {
    let color = match mark {
        Mark::X => Color::Blue,
        Mark::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;
    use tictactoe_duel::{Controller, FirstAvailable, GameSession};

    #[test]
    fn test_draw_shows_score_and_status() {
        let session = GameSession::new(Mark::X, Box::new(FirstAvailable::new("AI")));
        let (controller, _rx) = Controller::new(session, Duration::from_millis(600));
        let app = App::new(controller);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Tic Tac Toe"));
        assert!(screen.contains("X: 0"));
        assert!(screen.contains("Your turn (X)"));
    }
}
