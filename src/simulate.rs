//! Headless games between two random players.

use crate::games::tictactoe::{GameStatus, Mark, MoveSelector, RandomOpponent};
use crate::session::{GameSession, SessionError};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Tally of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
pub struct SimulationReport {
    /// Games played.
    games: u32,
    /// Games won by X (the side that moves first).
    x_wins: u32,
    /// Games won by O.
    o_wins: u32,
    /// Drawn games.
    draws: u32,
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, {} drawn",
            self.games, self.x_wins, self.o_wins, self.draws
        )
    }
}

/// Plays `games` games of random X against random O through a session.
///
/// X stands in for the human and always opens. With a seed the run is
/// reproducible.
#[instrument]
pub fn simulate(games: u32, seed: Option<u64>) -> Result<SimulationReport, SessionError> {
    let (mut stand_in, opponent) = match seed {
        Some(seed) => (
            RandomOpponent::seeded("Random X", seed),
            RandomOpponent::seeded("Random O", seed.wrapping_add(1)),
        ),
        None => (RandomOpponent::new("Random X"), RandomOpponent::new("Random O")),
    };
    let mut session = GameSession::new(Mark::X, Box::new(opponent));
    let mut draws = 0;

    for game in 0..games {
        let status = play_one(&mut session, &mut stand_in)?;
        debug!(game, %status, "Game finished");
        if status == GameStatus::Draw {
            draws += 1;
        }
        session.reset();
    }

    let report = SimulationReport {
        games,
        x_wins: session.score().wins(Mark::X),
        o_wins: session.score().wins(Mark::O),
        draws,
    };
    info!(%report, "Simulation complete");
    Ok(report)
}

fn play_one(
    session: &mut GameSession,
    stand_in: &mut impl MoveSelector,
) -> Result<GameStatus, SessionError> {
    loop {
        let position = stand_in.select(session.state().board())?;
        let transition = session.human_move(position.to_index() as isize)?;
        let Some(ticket) = *transition.reply() else {
            return Ok(*transition.status());
        };
        let reply = session.opponent_move(ticket)?;
        if reply.status().is_over() {
            return Ok(*reply.status());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_game_is_counted_once() {
        let report = simulate(200, Some(11)).unwrap();
        assert_eq!(report.games(), &200);
        assert_eq!(report.x_wins() + report.o_wins() + report.draws(), 200);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        assert_eq!(simulate(50, Some(3)).unwrap(), simulate(50, Some(3)).unwrap());
    }

    #[test]
    fn test_first_mover_wins_more_often() {
        // Random play favours the opening side by a wide margin.
        let report = simulate(2_000, Some(8)).unwrap();
        assert!(report.x_wins() > report.o_wins());
    }
}
