//! Two-click move selection.
//!
//! The first click picks a source square that has legal moves, the second
//! click tries to complete the move. A second click that does not complete a
//! move restarts selection from the clicked square instead of reporting an
//! error.

use shakmaty::Square;
use tracing::{debug, instrument};

use crate::highlight::{HighlightMap, option_layer};
use crate::position::{MoveOption, PositionStore, PromotionPolicy};

/// Whether a move source is currently chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No source square chosen.
    #[default]
    Idle,
    /// Waiting for the destination of a move from this square.
    Pending(Square),
}

/// What a left click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The clicked square has no legal moves; selection is idle.
    Cleared,
    /// The clicked square became the pending source.
    Selected(Square),
    /// A move was committed to the position store.
    Moved(MoveOption),
}

/// Click-driven selection state plus the legal moves of the pending source.
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: SelectionState,
    options: Vec<MoveOption>,
}

impl SelectionMachine {
    /// Creates an idle selection machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current selection state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Returns the legal moves from the pending source, empty when idle.
    pub fn options(&self) -> &[MoveOption] {
        &self.options
    }

    /// Handles a left click on `square`.
    #[instrument(skip(self, store, promotion), fields(state = ?self.state))]
    pub fn click(
        &mut self,
        store: &mut PositionStore,
        square: Square,
        promotion: PromotionPolicy,
    ) -> SelectionOutcome {
        let SelectionState::Pending(source) = self.state else {
            return self.select(store, square);
        };

        match store.apply_move(source, square, promotion) {
            Ok(applied) => {
                self.clear();
                SelectionOutcome::Moved(applied)
            }
            Err(rejected) => {
                debug!(%rejected, "Reselecting from clicked square");
                self.select(store, square)
            }
        }
    }

    /// Returns to `Idle` and drops the cached options.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
        self.options.clear();
    }

    /// Returns the source and destination highlights, empty when idle.
    pub fn highlights(&self) -> HighlightMap {
        match self.state {
            SelectionState::Idle => HighlightMap::new(),
            SelectionState::Pending(source) => option_layer(source, &self.options),
        }
    }

    fn select(&mut self, store: &PositionStore, square: Square) -> SelectionOutcome {
        let options = store.legal_moves(Some(square));
        if options.is_empty() {
            debug!(%square, "No legal moves from square");
            self.clear();
            return SelectionOutcome::Cleared;
        }

        debug!(%square, count = options.len(), "Source selected");
        self.state = SelectionState::Pending(square);
        self.options = options;
        SelectionOutcome::Selected(square)
    }
}
