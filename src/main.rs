//! tictactoe_duel - command-line entry point.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_duel::GameConfig;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            delay_ms,
            human,
            seed,
        } => {
            let config = GameConfig::load_or_default(&config)?.with_overrides(human, delay_ms, seed);
            tui::run_tui(config).await
        }
        Command::Simulate { games, seed, json } => run_simulation(games, seed, json),
    }
}

/// Play headless games and print the tally
#[instrument]
fn run_simulation(games: u32, seed: Option<u64>, json: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting simulation");
    let report = tictactoe_duel::simulate(games, seed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
