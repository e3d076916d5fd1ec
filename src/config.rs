//! Game configuration loaded from TOML.

use crate::games::tictactoe::Mark;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Mark played by the human, who always moves first.
    human_mark: Mark,

    /// Pause before the opponent replies, in milliseconds.
    reply_delay_ms: u64,

    /// Seed for the opponent's choices; entropy when absent.
    seed: Option<u64>,

    /// File the terminal UI writes its logs to.
    log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            reply_delay_ms: 600,
            seed: None,
            log_file: PathBuf::from("tictactoe_duel.log"),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        human_mark: Option<Mark>,
        reply_delay_ms: Option<u64>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(mark) = human_mark {
            self.human_mark = mark;
        }
        if let Some(delay) = reply_delay_ms {
            self.reply_delay_ms = delay;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// The opponent's pause as a [`Duration`].
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
