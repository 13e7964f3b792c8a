//! Transient notifications shown over the board.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use playvsrandom_core::{Notice, Notifier};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Most toasts drawn at once; older ones stay queued until they expire.
pub const MAX_VISIBLE: usize = 3;

/// A notice with its expiry time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// The notice being shown.
    pub notice: Notice,
    /// When it closes.
    pub expires_at: Instant,
}

/// Queue of toasts, oldest first.
#[derive(Debug)]
pub struct Toasts {
    items: VecDeque<Toast>,
    lifetime: Duration,
}

impl Toasts {
    /// Creates an empty queue whose toasts close after `lifetime`.
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            lifetime,
        }
    }

    /// Shows `notice` from `now` until the lifetime elapses.
    pub fn push(&mut self, notice: Notice, now: Instant) {
        debug!(kind = %notice.kind, message = %notice.message, "Showing toast");
        self.items.push_back(Toast {
            notice,
            expires_at: now + self.lifetime,
        });
    }

    /// Drops toasts that have expired at `now`. Returns how many were dropped.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|toast| toast.expires_at > now);
        before - self.items.len()
    }

    /// Returns the toasts to draw, newest last.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        let skip = self.items.len().saturating_sub(MAX_VISIBLE);
        self.items.iter().skip(skip)
    }

    /// Returns when the next toast closes.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.items.iter().map(|toast| toast.expires_at).min()
    }

    /// Returns the number of queued toasts.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Forwards session notices to the UI over a channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Creates a notifier sending into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<Notice>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&mut self, notice: Notice) {
        if let Err(e) = self.tx.send(notice) {
            warn!(error = %e, "Notice dropped, receiver closed");
        }
    }
}
