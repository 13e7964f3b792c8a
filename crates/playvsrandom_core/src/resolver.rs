//! Turn resolution: the opponent's delayed reply and the end-of-game reset.

use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use crate::config::SessionConfig;
use crate::notify::{Notice, Notifier};
use crate::opponent::Opponent;
use crate::position::{GameOutcome, MoveOption, PositionStore, PromotionPolicy};
use crate::timer::{PendingTimer, TimerKind, TimerSlot, TimerToken};

/// What the opponent did when its turn came.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The opponent committed a move. `game_over` is set if that move ended the game.
    Moved {
        /// The committed move.
        mv: MoveOption,
        /// Why the game ended, if the reply ended it.
        game_over: Option<GameOutcome>,
    },
    /// The game was already over; nothing was played.
    GameOver(GameOutcome),
    /// The opponent produced no usable move.
    Declined,
}

/// Sequences the human move, the opponent's reply and the automatic reset.
#[derive(Debug)]
pub struct TurnResolver {
    timers: TimerSlot,
    opponent_delay: Duration,
    reset_delay: Duration,
}

impl TurnResolver {
    /// Creates a resolver with the delays from `config`.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            timers: TimerSlot::new(),
            opponent_delay: *config.opponent_delay(),
            reset_delay: *config.reset_delay(),
        }
    }

    /// Schedules the opponent's reply to the human's move `mv`.
    #[instrument(skip(self, mv, now), fields(mv = %mv))]
    pub fn on_human_move(&mut self, mv: &MoveOption, now: Instant) -> TimerToken {
        self.timers.schedule(TimerKind::OpponentMove, now, self.opponent_delay)
    }

    /// Returns the outstanding timer.
    pub fn pending(&self) -> Option<&PendingTimer> {
        self.timers.pending()
    }

    /// Returns when the outstanding timer is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Cancels the outstanding timer so it cannot act on a changed position.
    pub fn cancel(&mut self) -> Option<PendingTimer> {
        self.timers.cancel()
    }

    /// Takes the outstanding timer if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingTimer> {
        self.timers.take_due(now)
    }

    /// Takes the outstanding timer if it carries `token`.
    pub fn take_matching(&mut self, token: TimerToken) -> Option<PendingTimer> {
        self.timers.take_matching(token)
    }

    /// Announces a game that is already over before anyone has moved and
    /// schedules its reset. Returns the outcome, or `None` if play can start.
    #[instrument(skip_all)]
    pub fn check_start<N>(
        &mut self,
        store: &PositionStore,
        notifier: &mut N,
        now: Instant,
    ) -> Option<GameOutcome>
    where
        N: Notifier + ?Sized,
    {
        let outcome = store.outcome()?;
        self.game_over(outcome, notifier, now);
        Some(outcome)
    }

    /// Plays the opponent's turn against `store`.
    ///
    /// A finished game is announced and an automatic reset scheduled instead
    /// of a move. The same happens when the reply itself ends the game.
    #[instrument(skip_all, fields(opponent = %opponent.name(), ply = store.ply_count()))]
    pub fn run_opponent<O, N>(
        &mut self,
        store: &mut PositionStore,
        opponent: &mut O,
        notifier: &mut N,
        now: Instant,
    ) -> ReplyOutcome
    where
        O: Opponent + ?Sized,
        N: Notifier + ?Sized,
    {
        if let Some(outcome) = store.outcome() {
            self.game_over(outcome, notifier, now);
            return ReplyOutcome::GameOver(outcome);
        }

        let moves = store.legal_moves(None);
        let Some(choice) = opponent.choose(&moves).and_then(|index| moves.get(index)) else {
            warn!(count = moves.len(), "Opponent produced no move");
            return ReplyOutcome::Declined;
        };

        let promotion = choice
            .promotion
            .and_then(PromotionPolicy::from_role)
            .unwrap_or_default();
        let mv = match store.apply_move(choice.from, choice.to, promotion) {
            Ok(mv) => mv,
            Err(rejected) => {
                warn!(%rejected, "Opponent move rejected");
                return ReplyOutcome::Declined;
            }
        };
        info!(%mv, "Opponent replied");

        let game_over = store.outcome();
        if let Some(outcome) = game_over {
            self.game_over(outcome, notifier, now);
        }
        ReplyOutcome::Moved { mv, game_over }
    }

    fn game_over<N>(&mut self, outcome: GameOutcome, notifier: &mut N, now: Instant)
    where
        N: Notifier + ?Sized,
    {
        info!(%outcome, "Game over");
        notifier.notify(Notice::game_over());
        notifier.notify(Notice::auto_reset(self.reset_delay.as_secs_f64().ceil() as u64));
        self.timers.schedule(TimerKind::AutoReset, now, self.reset_delay);
    }
}
