//! Terminal UI for tictactoe_duel

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::time::Duration;
use tictactoe_duel::{Controller, GameConfig, GameSession, RandomOpponent, ReplyTicket};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use app::App;

/// Run the TUI client
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tictactoe_duel=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(?config, "Starting tictactoe_duel TUI");

    let opponent = match config.seed() {
        Some(seed) => RandomOpponent::seeded("AI", *seed),
        None => RandomOpponent::new("AI"),
    };
    let session = GameSession::new(*config.human_mark(), Box::new(opponent));
    let (controller, replies) = Controller::new(session, config.reply_delay());
    let mut app = App::new(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut app, replies).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(score = %app.controller().session().score(), "Session ended");
    res
}

/// Draw, feed opponent replies back in, and handle keys until quit.
#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut replies: mpsc::UnboundedReceiver<ReplyTicket>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(ticket) = replies.try_recv() {
            app.on_reply(ticket);
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        let chimes = app.take_chimes();
        if chimes > 0 {
            let backend = terminal.backend_mut();
            backend.write_all("\x07".repeat(chimes).as_bytes())?;
            backend.flush()?;
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
