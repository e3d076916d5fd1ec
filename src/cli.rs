//! Command-line interface for tictactoe_duel.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_duel::Mark;

/// Tic-tac-toe against a random opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_duel")]
#[command(about = "Tic-tac-toe against a random opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the TOML config file (defaults apply if it doesn't exist)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: PathBuf,

        /// Pause before the opponent replies, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Your mark (X or O); you always move first
        #[arg(long)]
        human: Option<Mark>,

        /// Seed for the opponent's choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play random games headlessly and print the tally
    Simulate {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        games: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
