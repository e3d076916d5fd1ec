//! Game session: one human against one computer opponent.
//!
//! The session owns the current [`GameState`], the [`Scoreboard`] and the
//! opponent strategy. It enforces turn order and hands out [`ReplyTicket`]s
//! that authorise the opponent's next move. Resetting starts a new
//! generation, so tickets issued for an earlier game are refused.

use crate::games::tictactoe::{
    EngineError, GameState, GameStatus, InvalidMove, Mark, Move, MoveSelector, Position,
    reset_game,
};
use crate::score::Scoreboard;
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument, warn};

/// Authorises one opponent move within a given game generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket {
    generation: u64,
}

impl ReplyTicket {
    /// The game generation this ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Feedback a front end may present after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A mark was placed.
    MoveAccepted(Move),
    /// The move completed a line.
    Victory(Mark),
    /// The move filled the board without a line.
    Draw,
}

/// The result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Transition {
    /// The move that was applied.
    placed: Move,
    /// Status after the move.
    status: GameStatus,
    /// Ticket for the opponent's reply, present when the opponent moves next.
    reply: Option<ReplyTicket>,
}

impl Transition {
    /// Cues for this transition, in presentation order.
    pub fn cues(&self) -> Vec<Cue> {
        let mut cues = vec![Cue::MoveAccepted(self.placed)];
        match self.status {
            GameStatus::Won(mark) => cues.push(Cue::Victory(mark)),
            GameStatus::Draw => cues.push(Cue::Draw),
            GameStatus::InProgress => {}
        }
        cues
    }
}

/// Errors raised by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// The engine refused the move.
    #[display("{}", _0)]
    Engine(EngineError),

    /// The ticket belongs to a game that has since been reset.
    #[display(
        "Stale opponent reply for generation {} (current generation {})",
        ticket.generation,
        current
    )]
    #[from(ignore)]
    StaleReply {
        /// The refused ticket.
        #[error(not(source))]
        ticket: ReplyTicket,
        /// The session's current generation.
        current: u64,
    },
}

impl From<InvalidMove> for SessionError {
    fn from(err: InvalidMove) -> Self {
        SessionError::Engine(err.into())
    }
}

/// A human playing one mark against a [`MoveSelector`] playing the other.
pub struct GameSession {
    state: GameState,
    score: Scoreboard,
    human: Mark,
    opponent: Box<dyn MoveSelector>,
    generation: u64,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("human", &self.human)
            .field("opponent", &self.opponent.name())
            .field("generation", &self.generation)
            .finish()
    }
}

impl GameSession {
    /// Creates a session; the human's mark moves first.
    #[instrument(skip(opponent), fields(opponent = opponent.name()))]
    pub fn new(human: Mark, opponent: Box<dyn MoveSelector>) -> Self {
        info!("Creating new game session");
        Self {
            state: reset_game(human),
            score: Scoreboard::new(),
            human,
            opponent,
            generation: 0,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the session scoreboard.
    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    /// Returns the human's mark.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// Returns the opponent's display name.
    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// Returns the current game generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true when the game is running and the human is to move.
    pub fn is_human_turn(&self) -> bool {
        !self.state.status().is_over() && self.state.current_mark() == self.human
    }

    /// Plays the human's mark at a raw cell index.
    ///
    /// # Errors
    ///
    /// `InvalidMove` if the game is over, it is the opponent's turn, or the
    /// cell is out of range or occupied. Nothing changes on error.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn human_move(&mut self, cell: isize) -> Result<Transition, EngineError> {
        if self.state.status().is_over() {
            return Err(InvalidMove::GameOver.into());
        }
        if self.state.current_mark() != self.human {
            debug!("Human moved during opponent's turn");
            return Err(InvalidMove::OutOfTurn(self.human).into());
        }
        let position = Position::try_from(cell)?;
        self.advance(position, self.human)
    }

    /// Plays the opponent's reply authorised by `ticket`.
    ///
    /// # Errors
    ///
    /// `StaleReply` if the session was reset after the ticket was issued;
    /// `InvalidMove` if it is not the opponent's turn; `NoLegalMove` if the
    /// board is full.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn opponent_move(&mut self, ticket: ReplyTicket) -> Result<Transition, SessionError> {
        if ticket.generation() != self.generation() {
            warn!(ticket = ticket.generation(), "Discarding stale opponent reply");
            return Err(SessionError::StaleReply {
                ticket,
                current: self.generation(),
            });
        }
        if self.state.status().is_over() {
            return Err(InvalidMove::GameOver.into());
        }
        let mark = self.human.opponent();
        if self.state.current_mark() != mark {
            return Err(InvalidMove::OutOfTurn(mark).into());
        }

        let position = self.opponent.select(self.state.board())?;
        Ok(self.advance(position, mark)?)
    }

    /// Starts a new game. The scoreboard is kept; outstanding tickets become
    /// stale.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> &GameState {
        self.generation = self.generation.wrapping_add(1);
        self.state = reset_game(self.human);
        info!(generation = self.generation, "Game reset");
        &self.state
    }

    fn advance(&mut self, position: Position, mark: Mark) -> Result<Transition, EngineError> {
        let next = self.state.place(position, mark)?.pass_turn();
        let status = next.status();
        self.state = next;

        // `place` refuses finished games, so this runs once per game.
        if status.is_over() {
            self.score.record(status);
            info!(%status, score = %self.score, "Game over");
        }

        let reply = (!status.is_over() && self.state.current_mark() != self.human).then_some(
            ReplyTicket {
                generation: self.generation,
            },
        );

        Ok(Transition {
            placed: Move::new(position, mark),
            status,
            reply,
        })
    }
}
