//! The single deferred-action slot.
//!
//! At most one action is outstanding at a time. Each scheduled action gets a
//! fresh token; a firing that presents a token other than the outstanding one
//! is stale and ignored.

use std::time::{Duration, Instant};

use derive_more::Display;
use tracing::{debug, instrument};

/// Kind of deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TimerKind {
    /// The opponent replies to the human's move.
    #[display("opponent move")]
    OpponentMove,
    /// The finished game is cleared back to the start.
    #[display("auto reset")]
    AutoReset,
}

/// Identifies one scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("timer#{}", _0)]
pub struct TimerToken(u64);

/// An outstanding deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    /// What runs when the timer fires.
    pub kind: TimerKind,
    /// When it becomes due.
    pub deadline: Instant,
    /// Identity used to reject stale firings.
    pub token: TimerToken,
}

/// Holds the outstanding timer, if any.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<PendingTimer>,
    next_token: u64,
}

impl TimerSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` to run `delay` after `now`, replacing any outstanding timer.
    #[instrument(skip(self, now))]
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, delay: Duration) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        if let Some(replaced) = self.pending.replace(PendingTimer {
            kind,
            deadline: now + delay,
            token,
        }) {
            debug!(replaced = %replaced.token, kind = %replaced.kind, "Replaced outstanding timer");
        }
        debug!(%token, "Timer scheduled");
        token
    }

    /// Drops the outstanding timer so it can never fire.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> Option<PendingTimer> {
        let cancelled = self.pending.take();
        if let Some(timer) = &cancelled {
            debug!(token = %timer.token, kind = %timer.kind, "Timer cancelled");
        }
        cancelled
    }

    /// Returns the outstanding timer.
    pub fn pending(&self) -> Option<&PendingTimer> {
        self.pending.as_ref()
    }

    /// Returns when the outstanding timer is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|timer| timer.deadline)
    }

    /// Removes and returns the outstanding timer if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingTimer> {
        self.pending.take_if(|timer| timer.deadline <= now)
    }

    /// Removes and returns the outstanding timer if it carries `token`.
    pub fn take_matching(&mut self, token: TimerToken) -> Option<PendingTimer> {
        let taken = self.pending.take_if(|timer| timer.token == token);
        if taken.is_none() {
            debug!(%token, "Ignoring stale timer");
        }
        taken
    }
}
