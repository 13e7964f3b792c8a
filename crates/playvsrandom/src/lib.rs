//! Terminal client for playing chess against a random opponent.
//!
//! The game rules, selection and turn timing live in `playvsrandom_core`;
//! this crate adds configuration, logging and the mouse-driven board.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod tui;

// Crate-level exports - Command line and configuration
pub use cli::Cli;
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Terminal UI
pub use tui::{
    Action, App, BOARD_HEIGHT, BOARD_WIDTH, BoardGeometry, BoardView, CELL_HEIGHT, CELL_WIDTH,
    ChannelNotifier, Control, IDLE_TICK, MAX_VISIBLE, ScreenLayout, Session, Toast, Toasts, draw,
    glyph, run, translate,
};
