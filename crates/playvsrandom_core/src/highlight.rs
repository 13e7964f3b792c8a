//! Square style overlays handed to the renderer.
//!
//! Overlays are derived, never stored: each layer is recomputed from state on
//! demand and layers are composed so later ones win on a shared square.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shakmaty::Square;

use crate::position::MoveOption;

/// Visual style token for one square.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum SquareStyle {
    /// Source or destination of the previous move.
    LastMove,
    /// The pending move source.
    Source,
    /// A reachable empty square.
    Target,
    /// A reachable square holding an enemy piece.
    CaptureTarget,
    /// A right-click marker.
    Annotation,
}

/// Mapping from square to the style drawn on it.
pub type HighlightMap = BTreeMap<Square, SquareStyle>;

/// Highlights for a pending source: its destinations plus the source itself.
///
/// Promotion variants share a destination and collapse to one entry.
pub fn option_layer(source: Square, options: &[MoveOption]) -> HighlightMap {
    let mut layer: HighlightMap = options
        .iter()
        .map(|option| {
            let style = if option.is_capture {
                SquareStyle::CaptureTarget
            } else {
                SquareStyle::Target
            };
            (option.to, style)
        })
        .collect();
    layer.insert(source, SquareStyle::Source);
    layer
}

/// Highlights for the previous move, empty before the first move.
pub fn last_move_layer(last: Option<&MoveOption>) -> HighlightMap {
    last.map(|mv| {
        HighlightMap::from([(mv.from, SquareStyle::LastMove), (mv.to, SquareStyle::LastMove)])
    })
    .unwrap_or_default()
}

/// Merges layers in order; a later layer overrides an earlier one per square.
pub fn compose<I>(layers: I) -> HighlightMap
where
    I: IntoIterator<Item = HighlightMap>,
{
    layers.into_iter().fold(HighlightMap::new(), |mut acc, layer| {
        acc.extend(layer);
        acc
    })
}
