//! Application configuration, loaded from TOML and overridden from the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use playvsrandom_core::{
    DEFAULT_OPPONENT_DELAY, DEFAULT_RESET_DELAY, FenError, Orientation, PositionStore,
    RandomOpponent, SessionConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::cli::Cli;

/// Settings for one run of the terminal client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Milliseconds the opponent waits before replying.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Milliseconds between game over and the automatic reset.
    #[serde(default = "default_reset_delay_ms")]
    reset_delay_ms: u64,

    /// Milliseconds a notification stays on screen.
    #[serde(default = "default_toast_duration_ms")]
    toast_duration_ms: u64,

    /// Whether the last move's squares are highlighted.
    #[serde(default)]
    highlight_last_move: bool,

    /// Seed for the opponent; drawn from the OS when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Position to start from instead of the standard start.
    #[serde(default)]
    start_fen: Option<String>,

    /// Side drawn at the bottom of the board.
    #[serde(default)]
    orientation: Orientation,

    /// Name shown for the opponent.
    #[serde(default = "default_opponent_name")]
    opponent_name: String,

    /// File the log is written to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_opponent_delay_ms() -> u64 {
    DEFAULT_OPPONENT_DELAY.as_millis() as u64
}

fn default_reset_delay_ms() -> u64 {
    DEFAULT_RESET_DELAY.as_millis() as u64
}

fn default_toast_duration_ms() -> u64 {
    5_000
}

fn default_opponent_name() -> String {
    "Random".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("playvsrandom.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: default_opponent_delay_ms(),
            reset_delay_ms: default_reset_delay_ms(),
            toast_duration_ms: default_toast_duration_ms(),
            highlight_last_move: false,
            seed: None,
            start_fen: None,
            orientation: Orientation::default(),
            opponent_name: default_opponent_name(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(opponent = %config.opponent_name, "Config loaded successfully");
        Ok(config)
    }

    /// Builds the configuration for this run: the file named by `--config`
    /// (or defaults), then the command-line overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(cli))
    }

    /// Applies the options given on the command line.
    #[instrument(skip_all)]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(fen) = &cli.fen {
            self.start_fen = Some(fen.clone());
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(ms) = cli.opponent_delay_ms {
            self.opponent_delay_ms = ms;
        }
        if let Some(ms) = cli.reset_delay_ms {
            self.reset_delay_ms = ms;
        }
        if let Some(ms) = cli.toast_duration_ms {
            self.toast_duration_ms = ms;
        }
        if cli.highlight_last_move {
            self.highlight_last_move = true;
        }
        if let Some(orientation) = cli.orientation {
            self.orientation = orientation;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = path.clone();
        }
        debug!(?self, "Applied command-line overrides");
        self
    }

    /// Returns the timing settings for the game session.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_opponent_delay(Duration::from_millis(self.opponent_delay_ms))
            .with_reset_delay(Duration::from_millis(self.reset_delay_ms))
            .with_highlight_last_move(self.highlight_last_move)
    }

    /// Returns how long a notification stays on screen.
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Builds the starting position.
    pub fn position_store(&self) -> Result<PositionStore, FenError> {
        match &self.start_fen {
            Some(fen) => PositionStore::from_fen(fen),
            None => Ok(PositionStore::new()),
        }
    }

    /// Builds the opponent, seeded when a seed is configured.
    pub fn opponent(&self) -> RandomOpponent {
        match self.seed {
            Some(seed) => RandomOpponent::seeded(self.opponent_name.clone(), seed),
            None => RandomOpponent::from_os_rng(self.opponent_name.clone()),
        }
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
