//! Tic-tac-toe against a random opponent.
//!
//! # Architecture
//!
//! - **Engine** ([`GameState`], [`check_termination`], [`MoveSelector`]):
//!   board, win/draw detection and opponent move selection. Pure and
//!   synchronous.
//! - **Session** ([`GameSession`]): turn order, scoreboard, reply tickets.
//! - **Controller** ([`Controller`]): session plus the cancellable timer that
//!   paces the opponent's reply.
//! - **Config** ([`GameConfig`]): TOML settings with command-line overrides.
//!
//! # Example
//!
//! ```
//! use tictactoe_duel::{GameSession, GameStatus, Mark, FirstAvailable};
//!
//! let mut session = GameSession::new(Mark::X, Box::new(FirstAvailable::new("AI")));
//! let turn = session.human_move(4)?;
//! assert_eq!(*turn.status(), GameStatus::InProgress);
//!
//! let ticket = turn.reply().expect("opponent moves next");
//! let reply = session.opponent_move(ticket)?;
//! assert_eq!(reply.placed().mark, Mark::O);
//! # Ok::<(), tictactoe_duel::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod games;
mod scheduler;
mod score;
mod session;
mod simulate;

// Crate-level exports - Game engine
pub use games::tictactoe::{
    Board, EngineError, FirstAvailable, GameState, GameStatus, InvalidMove, Mark, Move,
    MoveSelector, ParseBoardError, ParseMarkError, Position, RandomOpponent, Square,
    check_termination, reset_game, rules, select_opponent_move,
};

// Crate-level exports - Session management
pub use controller::Controller;
pub use scheduler::ReplyTimer;
pub use score::Scoreboard;
pub use session::{Cue, GameSession, ReplyTicket, SessionError, Transition};

// Crate-level exports - Configuration and tooling
pub use config::{ConfigError, GameConfig};
pub use simulate::{SimulationReport, simulate};
