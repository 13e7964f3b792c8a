//! Session timing and display settings.

use std::time::Duration;

use derive_getters::Getters;
use derive_setters::Setters;

/// Delay between the human's move and the opponent's reply.
pub const DEFAULT_OPPONENT_DELAY: Duration = Duration::from_millis(300);

/// Delay between game over and the automatic reset.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

/// Settings for one [`GameSession`](crate::GameSession).
///
/// ```
/// use std::time::Duration;
/// use playvsrandom_core::SessionConfig;
///
/// let config = SessionConfig::default().with_opponent_delay(Duration::from_millis(200));
/// assert_eq!(*config.opponent_delay(), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Wait before the opponent replies, long enough for the move animation.
    opponent_delay: Duration,
    /// Wait between game over and the automatic reset.
    reset_delay: Duration,
    /// Whether the previous move is highlighted.
    highlight_last_move: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opponent_delay: DEFAULT_OPPONENT_DELAY,
            reset_delay: DEFAULT_RESET_DELAY,
            highlight_last_move: false,
        }
    }
}
