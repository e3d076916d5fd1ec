//! Application state and logic.

use crossterm::event::KeyCode;
use tictactoe_duel::{Controller, Cue, GameStatus, Position, ReplyTicket, Transition};
use tracing::debug;

use super::input;

/// Main application state.
pub struct App {
    controller: Controller,
    cursor: Position,
    cues: Vec<Cue>,
    chimes: usize,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            cursor: Position::Center,
            cues: Vec::new(),
            chimes: 0,
            should_quit: false,
        }
    }

    /// Gets the controller.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Cues from the most recent accepted move.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Takes the number of terminal bells owed since the last call.
    ///
    /// One per accepted move, two more on a victory.
    pub fn take_chimes(&mut self) -> usize {
        std::mem::take(&mut self.chimes)
    }

    /// Returns true once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.tap(self.cursor),
            KeyCode::Char(c) => {
                if let Some(pos) = input::digit_position(c) {
                    self.cursor = pos;
                    self.tap(pos);
                }
            }
            other => self.cursor = input::move_cursor(self.cursor, other),
        }
    }

    /// Applies an opponent reply delivered by the timer.
    pub fn on_reply(&mut self, ticket: ReplyTicket) {
        match self.controller.on_reply(ticket) {
            Ok(transition) => self.show(transition),
            Err(err) => debug!(%err, "Opponent reply discarded"),
        }
    }

    /// Restarts the game, keeping the score.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.controller.reset();
        self.cues.clear();
    }

    /// One-line summary of whose turn it is or how the game ended.
    pub fn status_line(&self) -> String {
        let session = self.controller.session();
        let human = session.human();
        match session.state().status() {
            GameStatus::Won(mark) if mark == human => {
                "You win! Press 'r' to restart or 'q' to quit.".to_string()
            }
            GameStatus::Won(mark) => format!(
                "{} ({}) wins. Press 'r' to restart or 'q' to quit.",
                session.opponent_name(),
                mark
            ),
            GameStatus::Draw => "It's a draw! Press 'r' to restart or 'q' to quit.".to_string(),
            GameStatus::InProgress if session.is_human_turn() => {
                format!(
                    "Your turn ({}). {} plays {}.",
                    human,
                    session.opponent_name(),
                    human.opponent()
                )
            }
            GameStatus::InProgress => format!("{} is thinking...", session.opponent_name()),
        }
    }

    // Rejected taps are ignored: no state change, no cue.
    fn tap(&mut self, pos: Position) {
        if let Ok(transition) = self.controller.tap(pos.to_index() as isize) {
            self.show(transition);
        }
    }

    fn show(&mut self, transition: Transition) {
        self.cues = transition.cues();
        for cue in &self.cues {
            self.chimes += match cue {
                Cue::MoveAccepted(_) => 1,
                Cue::Victory(_) => 2,
                Cue::Draw => 0,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tictactoe_duel::{FirstAvailable, GameSession, Mark, Square};

    fn app() -> (App, tokio::sync::mpsc::UnboundedReceiver<ReplyTicket>) {
        let session = GameSession::new(Mark::X, Box::new(FirstAvailable::new("AI")));
        let (controller, rx) = Controller::new(session, Duration::from_millis(600));
        (App::new(controller), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_digit_key_places_mark_and_reply_follows() {
        let (mut app, mut rx) = app();
        app.handle_key(KeyCode::Char('5'));
        let board = *app.controller().session().state().board();
        assert_eq!(board.get(Position::Center), Square::Occupied(Mark::X));
        assert!(app.status_line().contains("thinking"));

        let ticket = rx.recv().await.unwrap();
        app.on_reply(ticket);
        let board = *app.controller().session().state().board();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Mark::O));
        assert!(app.status_line().starts_with("Your turn"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_on_occupied_square_is_ignored() {
        let (mut app, mut rx) = app();
        app.handle_key(KeyCode::Char('1'));
        let ticket = rx.recv().await.unwrap();
        app.on_reply(ticket);
        let cues = app.cues().to_vec();

        // Square 2 now holds O
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.cues(), cues.as_slice());
        assert!(app.controller().session().is_human_turn());
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_moves_and_victory_ring_the_bell() {
        let (mut app, mut rx) = app();
        assert_eq!(app.take_chimes(), 0);

        // X: 4, 5 ; FirstAvailable O: 1, 2
        for key in ['4', '5'] {
            app.handle_key(KeyCode::Char(key));
            assert_eq!(app.take_chimes(), 1);
            app.on_reply(rx.recv().await.unwrap());
            assert_eq!(app.take_chimes(), 1);
        }

        // Rejected tap on an occupied square stays silent
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.take_chimes(), 0);

        app.handle_key(KeyCode::Char('6'));
        assert_eq!(app.take_chimes(), 3);
        assert_eq!(app.take_chimes(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_and_restart_keys() {
        let (mut app, _rx) = app();
        app.handle_key(KeyCode::Char('5'));
        app.handle_key(KeyCode::Char('r'));
        assert!(!app.controller().awaiting_reply());
        assert!(app.controller().session().state().history().is_empty());
        assert!(app.cues().is_empty());

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
