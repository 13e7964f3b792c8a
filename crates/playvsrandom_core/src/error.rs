//! Error types for the interaction core.

use derive_more::{Display, Error};
use shakmaty::Square;
use tracing::instrument;

/// A move the rules oracle refused.
///
/// The selection machine recovers from this locally by treating the clicked
/// square as a new source; it never reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("No legal move from {} to {}", from, to)]
pub struct IllegalMove {
    /// Requested source square.
    pub from: Square,
    /// Requested destination square.
    pub to: Square,
}

/// Failure to load a position from a FEN string.
#[derive(Debug, Clone, Display, Error)]
#[display("FEN error: {} at {}:{}", message, file, line)]
pub struct FenError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl FenError {
    /// Creates a new FEN error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<shakmaty::fen::ParseFenError> for FenError {
    #[track_caller]
    fn from(err: shakmaty::fen::ParseFenError) -> Self {
        Self::new(format!("Unparseable FEN: {}", err))
    }
}

impl From<shakmaty::PositionError<shakmaty::Chess>> for FenError {
    #[track_caller]
    fn from(err: shakmaty::PositionError<shakmaty::Chess>) -> Self {
        Self::new(format!("Illegal position: {}", err))
    }
}
