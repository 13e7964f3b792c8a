//! Right-click square markers.

use std::collections::BTreeSet;

use shakmaty::Square;
use tracing::{debug, instrument};

use crate::highlight::{HighlightMap, SquareStyle};

/// Set of squares currently carrying the annotation marker.
///
/// Toggled by right clicks, cleared wholesale when a left click starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationMap {
    marked: BTreeSet<Square>,
}

impl AnnotationMap {
    /// Creates an empty annotation map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the marker on `square`. Returns `true` if it is now marked.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, square: Square) -> bool {
        let marked = if self.marked.remove(&square) {
            false
        } else {
            self.marked.insert(square)
        };
        debug!(marked, "Annotation toggled");
        marked
    }

    /// Removes every marker.
    pub fn clear(&mut self) {
        self.marked.clear();
    }

    /// Returns `true` if `square` is marked.
    pub fn is_marked(&self, square: Square) -> bool {
        self.marked.contains(&square)
    }

    /// Returns `true` if nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Returns the marked squares in board order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.marked.iter().copied()
    }

    /// Returns the markers as an overlay layer.
    pub fn layer(&self) -> HighlightMap {
        self.squares()
            .map(|square| (square, SquareStyle::Annotation))
            .collect()
    }
}
