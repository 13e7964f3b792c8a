//! Command-line interface for playvsrandom.

use std::path::PathBuf;

use clap::Parser;
use playvsrandom_core::Orientation;

/// Play chess in the terminal against an opponent that picks random legal moves
#[derive(Parser, Debug, Default)]
#[command(name = "playvsrandom")]
#[command(about = "Play chess in the terminal against a random opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Starting position as FEN (resets still return to the standard start)
    #[arg(long)]
    pub fen: Option<String>,

    /// Seed for the opponent's move choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds the opponent waits before replying
    #[arg(long)]
    pub opponent_delay_ms: Option<u64>,

    /// Milliseconds before a finished game resets
    #[arg(long)]
    pub reset_delay_ms: Option<u64>,

    /// Milliseconds a notification stays on screen
    #[arg(long)]
    pub toast_duration_ms: Option<u64>,

    /// Highlight the squares of the last move
    #[arg(long)]
    pub highlight_last_move: bool,

    /// Side shown at the bottom of the board (white or black)
    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// File the log is written to
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
