//! Which side of the board is drawn at the bottom.

use serde::{Deserialize, Serialize};
use shakmaty::Color;
use tracing::instrument;

/// Board orientation, a pure display flag.
///
/// Defaults to [`Orientation::White`] so white's pieces start at the bottom.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// White at the bottom.
    #[default]
    White,
    /// Black at the bottom.
    Black,
}

impl Orientation {
    /// Returns the opposite orientation.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns the side drawn at the bottom.
    pub fn bottom(self) -> Color {
        match self {
            Self::White => Color::White,
            Self::Black => Color::Black,
        }
    }
}
