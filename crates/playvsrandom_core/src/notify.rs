//! Fire-and-forget user notifications.

use derive_more::Display;

/// What a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NoticeKind {
    /// The game has ended.
    #[display("game over")]
    GameOver,
    /// The board will reset shortly.
    #[display("auto reset pending")]
    AutoResetPending,
}

/// One informational message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{message}")]
pub struct Notice {
    /// What the notice is about.
    pub kind: NoticeKind,
    /// Literal text shown to the user.
    pub message: String,
}

impl Notice {
    /// The end-of-game notice.
    pub fn game_over() -> Self {
        Self {
            kind: NoticeKind::GameOver,
            message: "♔ GAME OVER".to_string(),
        }
    }

    /// The notice announcing a reset after `seconds`.
    pub fn auto_reset(seconds: u64) -> Self {
        Self {
            kind: NoticeKind::AutoResetPending,
            message: format!("THE GAME WILL RESET AFTER {} SECONDS", seconds),
        }
    }
}

/// Receives notices. Delivery is fire-and-forget; nothing is returned.
pub trait Notifier {
    /// Delivers one notice.
    fn notify(&mut self, notice: Notice);
}

/// Collects notices in order, for callers that display them later.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}
