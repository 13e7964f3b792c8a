//! Tests for loading and overriding the application configuration.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use playvsrandom::{AppConfig, Cli};
use playvsrandom_core::Orientation;
use tempfile::NamedTempFile;

/// Writes `content` to a temporary TOML file; keep the handle alive while in use.
fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(*config.opponent_delay_ms(), 300);
    assert_eq!(*config.reset_delay_ms(), 5_000);
    assert_eq!(*config.toast_duration_ms(), 5_000);
    assert!(!*config.highlight_last_move());
    assert_eq!(*config.orientation(), Orientation::White);
    assert_eq!(config.log_file(), &PathBuf::from("playvsrandom.log"));
    assert_eq!(config.opponent_name(), "Random");
}

#[test]
fn test_partial_file_fills_defaults() {
    let file = config_file(
        r#"
opponent_delay_ms = 200
seed = 42
orientation = "black"
"#,
    );
    let config = AppConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(*config.opponent_delay_ms(), 200);
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(*config.orientation(), Orientation::Black);
    assert_eq!(*config.reset_delay_ms(), 5_000);
    assert!(config.start_fen().is_none());
}

#[test]
fn test_empty_file_is_default() {
    let file = config_file("");
    let config = AppConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_error() {
    let file = config_file("opponent_delay_ms = \"soon\"");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_command_line_overrides_file() {
    let file = config_file("seed = 1\nreset_delay_ms = 8000\nopponent_name = \"Dice\"\n");
    let path = file.path().to_str().expect("Invalid path");
    let cli = Cli::try_parse_from([
        "playvsrandom",
        "--config",
        path,
        "--seed",
        "7",
        "--reset-delay-ms",
        "1000",
        "--orientation",
        "black",
        "--highlight-last-move",
    ])
    .expect("Parse failed");

    let config = AppConfig::from_cli(&cli).expect("Load failed");
    assert_eq!(*config.seed(), Some(7));
    assert_eq!(*config.reset_delay_ms(), 1_000);
    assert_eq!(*config.orientation(), Orientation::Black);
    assert!(*config.highlight_last_move());
    assert_eq!(config.opponent_name(), "Dice");
}

#[test]
fn test_unknown_orientation_rejected() {
    let result = Cli::try_parse_from(["playvsrandom", "--orientation", "sideways"]);
    assert!(result.is_err());
}

#[test]
fn test_session_config_conversion() {
    let cli = Cli {
        opponent_delay_ms: Some(250),
        reset_delay_ms: Some(3_000),
        highlight_last_move: true,
        ..Default::default()
    };
    let session = AppConfig::default().with_overrides(&cli).session_config();
    assert_eq!(*session.opponent_delay(), Duration::from_millis(250));
    assert_eq!(*session.reset_delay(), Duration::from_secs(3));
    assert!(*session.highlight_last_move());
}

#[test]
fn test_start_fen() {
    let fen = "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1";
    let cli = Cli {
        fen: Some(fen.to_string()),
        ..Default::default()
    };
    let store = AppConfig::default()
        .with_overrides(&cli)
        .position_store()
        .expect("Valid FEN");
    assert_eq!(store.fen(), fen);
}

#[test]
fn test_invalid_start_fen_rejected() {
    let cli = Cli {
        fen: Some("not a position".to_string()),
        ..Default::default()
    };
    let result = AppConfig::default().with_overrides(&cli).position_store();
    assert!(result.is_err());
}
