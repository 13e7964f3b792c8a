//! The owned state container behind one board.
//!
//! [`GameSession`] holds the position, selection, annotations, orientation and
//! the outstanding timer, and is only changed through its methods. Every
//! method runs to completion; the only deferred work is the timer, fired by
//! the caller through [`GameSession::poll_timers`] or [`GameSession::fire`].

use std::time::Instant;

use shakmaty::Square;
use tracing::{debug, info, instrument};

use crate::annotation::AnnotationMap;
use crate::config::SessionConfig;
use crate::highlight::{HighlightMap, compose, last_move_layer};
use crate::notify::Notifier;
use crate::opponent::Opponent;
use crate::orientation::Orientation;
use crate::position::{GameOutcome, MoveOption, PositionStore, PromotionPolicy};
use crate::resolver::{ReplyOutcome, TurnResolver};
use crate::selection::{SelectionMachine, SelectionOutcome, SelectionState};
use crate::timer::{PendingTimer, TimerKind, TimerToken};

/// What a fired timer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The opponent's turn ran.
    Reply(ReplyOutcome),
    /// The finished game was reset to the start.
    AutoReset,
}

/// A human-versus-opponent game driven by click events.
#[derive(Debug)]
pub struct GameSession<O, N> {
    store: PositionStore,
    selection: SelectionMachine,
    annotations: AnnotationMap,
    orientation: Orientation,
    resolver: TurnResolver,
    opponent: O,
    notifier: N,
    config: SessionConfig,
}

impl<O: Opponent, N: Notifier> GameSession<O, N> {
    /// Creates a session playing from the position in `store`.
    #[instrument(skip_all, fields(opponent = %opponent.name(), fen = %store.fen()))]
    pub fn new(store: PositionStore, opponent: O, notifier: N, config: SessionConfig) -> Self {
        info!("Creating game session");
        Self {
            store,
            selection: SelectionMachine::new(),
            annotations: AnnotationMap::new(),
            orientation: Orientation::default(),
            resolver: TurnResolver::new(&config),
            opponent,
            notifier,
            config,
        }
    }

    /// Checks the starting position. A game that is already over is
    /// announced and its reset scheduled, exactly as after a final move.
    ///
    /// Call once after [`GameSession::new`]; returns the outcome if the game
    /// cannot be played from here.
    pub fn start(&mut self, now: Instant) -> Option<GameOutcome> {
        self.resolver.check_start(&self.store, &mut self.notifier, now)
    }

    // ─────────────────────────────────────────────────────────────
    //  Read side for the renderer
    // ─────────────────────────────────────────────────────────────

    /// Returns the position store.
    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    /// Returns the current position as a FEN string.
    pub fn fen(&self) -> String {
        self.store.fen()
    }

    /// Returns the board orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the selection state.
    pub fn selection(&self) -> SelectionState {
        self.selection.state()
    }

    /// Returns the legal moves from the pending source, empty when idle.
    pub fn selected_options(&self) -> &[MoveOption] {
        self.selection.options()
    }

    /// Returns the right-click markers.
    pub fn annotations(&self) -> &AnnotationMap {
        &self.annotations
    }

    /// Returns the outstanding timer.
    pub fn pending_timer(&self) -> Option<&PendingTimer> {
        self.resolver.pending()
    }

    /// Returns when the outstanding timer is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resolver.next_deadline()
    }

    /// Returns the opponent.
    pub fn opponent(&self) -> &O {
        &self.opponent
    }

    /// Returns the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the combined square styles: last move, then move options, then
    /// annotations on top.
    pub fn overlays(&self) -> HighlightMap {
        let history = if *self.config.highlight_last_move() {
            last_move_layer(self.store.last_move())
        } else {
            HighlightMap::new()
        };
        compose([history, self.selection.highlights(), self.annotations.layer()])
    }

    // ─────────────────────────────────────────────────────────────
    //  Board events
    // ─────────────────────────────────────────────────────────────

    /// Handles a left click on `square`.
    ///
    /// Annotations are cleared first. While a reply or reset is outstanding
    /// the click is otherwise ignored and `None` returned.
    #[instrument(skip(self, now))]
    pub fn left_click(&mut self, square: Square, now: Instant) -> Option<SelectionOutcome> {
        self.annotations.clear();

        if let Some(timer) = self.resolver.pending() {
            debug!(kind = %timer.kind, "Ignoring click while timer outstanding");
            return None;
        }

        let outcome = self
            .selection
            .click(&mut self.store, square, PromotionPolicy::Queen);
        if let SelectionOutcome::Moved(mv) = &outcome {
            info!(%mv, "Human moved");
            self.resolver.on_human_move(mv, now);
        }
        Some(outcome)
    }

    /// Handles a right click on `square`. Returns `true` if it is now marked.
    #[instrument(skip(self))]
    pub fn right_click(&mut self, square: Square) -> bool {
        self.annotations.toggle(square)
    }

    // ─────────────────────────────────────────────────────────────
    //  User controls
    // ─────────────────────────────────────────────────────────────

    /// Returns to the starting position, cancelling any outstanding timer.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.resolver.cancel();
        self.clear_board();
        info!("Game reset by user");
    }

    /// Takes back one move, cancelling any outstanding timer.
    ///
    /// Returns `false` at the initial position; the timer is cancelled either way.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        self.resolver.cancel();
        self.selection.clear();
        self.store.undo()
    }

    /// Flips the board. Position and selection are untouched.
    #[instrument(skip(self))]
    pub fn flip_board(&mut self) -> Orientation {
        self.orientation = self.orientation.toggle();
        debug!(orientation = %self.orientation, "Board flipped");
        self.orientation
    }

    /// Sets the board orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    // ─────────────────────────────────────────────────────────────
    //  Deferred actions
    // ─────────────────────────────────────────────────────────────

    /// Runs the outstanding timer if it is due at `now`.
    pub fn poll_timers(&mut self, now: Instant) -> Option<TimerEvent> {
        let timer = self.resolver.take_due(now)?;
        Some(self.run_timer(timer, now))
    }

    /// Runs the outstanding timer if it carries `token`, whatever its deadline.
    ///
    /// For callers that keep their own clock. A token from a cancelled or
    /// already-fired timer does nothing.
    pub fn fire(&mut self, token: TimerToken, now: Instant) -> Option<TimerEvent> {
        let timer = self.resolver.take_matching(token)?;
        Some(self.run_timer(timer, now))
    }

    #[instrument(skip(self, now), fields(kind = %timer.kind, token = %timer.token))]
    fn run_timer(&mut self, timer: PendingTimer, now: Instant) -> TimerEvent {
        match timer.kind {
            TimerKind::OpponentMove => TimerEvent::Reply(self.resolver.run_opponent(
                &mut self.store,
                &mut self.opponent,
                &mut self.notifier,
                now,
            )),
            TimerKind::AutoReset => {
                self.clear_board();
                info!("Game reset automatically");
                TimerEvent::AutoReset
            }
        }
    }

    fn clear_board(&mut self) {
        self.store.reset();
        self.selection.clear();
        self.annotations.clear();
    }
}
