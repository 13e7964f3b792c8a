//! Application state and logic.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use playvsrandom_core::{
    FenError, GameSession, Notice, Opponent, RandomOpponent, ReplyOutcome, SelectionOutcome,
    TimerEvent, TimerKind,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use super::input::{Action, Control, ScreenLayout};
use super::toast::{ChannelNotifier, Toasts};
use crate::config::AppConfig;

/// Longest the event loop sleeps without redrawing.
pub const IDLE_TICK: Duration = Duration::from_millis(250);

/// The game session as the terminal client runs it.
pub type Session = GameSession<RandomOpponent, ChannelNotifier>;

/// Main application state.
pub struct App {
    session: Session,
    notices: mpsc::UnboundedReceiver<Notice>,
    toasts: Toasts,
    layout: ScreenLayout,
    status_message: String,
}

impl App {
    /// Creates the application from `config`.
    #[instrument(skip_all)]
    pub fn new(config: &AppConfig) -> Result<Self, FenError> {
        let (tx, notices) = mpsc::unbounded_channel();
        let mut session = GameSession::new(
            config.position_store()?,
            config.opponent(),
            ChannelNotifier::new(tx),
            config.session_config(),
        );
        session.set_orientation(*config.orientation());
        let status_message = match session.start(Instant::now()) {
            Some(outcome) => format!("Game over: {}.", outcome),
            None => "Your move. Click a piece to select it.".to_string(),
        };
        info!(fen = %session.fen(), "Application ready");

        Ok(Self {
            session,
            notices,
            toasts: Toasts::new(config.toast_duration()),
            layout: ScreenLayout::default(),
            status_message,
        })
    }

    /// Gets the game session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Gets the toasts on screen.
    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    /// Gets the clickable regions from the last draw.
    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    /// Records the clickable regions of the frame just drawn.
    pub fn set_layout(&mut self, layout: ScreenLayout) {
        self.layout = layout;
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Describes the outstanding timer, if any.
    pub fn pending_message(&self, now: Instant) -> Option<String> {
        let timer = self.session.pending_timer()?;
        Some(match timer.kind {
            TimerKind::OpponentMove => format!("{} is thinking...", self.opponent_name()),
            TimerKind::AutoReset => {
                let left = timer.deadline.saturating_duration_since(now);
                format!("Resetting in {}s", left.as_secs_f32().ceil() as u64)
            }
        })
    }

    /// Handles one user action. Returns `Break` when the user quits.
    #[instrument(skip(self, now))]
    pub fn handle(&mut self, action: Action, now: Instant) -> ControlFlow<()> {
        match action {
            Action::Select(square) => {
                self.status_message = match self.session.left_click(square, now) {
                    None => match self.session.pending_timer().map(|timer| timer.kind) {
                        Some(TimerKind::AutoReset) => "Game over. Wait for the reset.".to_string(),
                        _ => format!("Wait for {} to move.", self.opponent_name()),
                    },
                    Some(SelectionOutcome::Cleared) => "Selection cleared.".to_string(),
                    Some(SelectionOutcome::Selected(source)) => format!(
                        "Selected {}: {} legal moves.",
                        source,
                        self.session.selected_options().len()
                    ),
                    Some(SelectionOutcome::Moved(mv)) => {
                        format!("You played {}. {} is thinking...", mv, self.opponent_name())
                    }
                };
            }
            Action::Annotate(square) => {
                let marked = self.session.right_click(square);
                debug!(%square, marked, "Annotation toggled");
            }
            Action::Control(Control::Reset) => {
                self.session.reset();
                self.status_message = "New game. Your move.".to_string();
            }
            Action::Control(Control::Flip) => {
                let orientation = self.session.flip_board();
                self.status_message = format!("Board flipped, {} at the bottom.", orientation);
            }
            Action::Control(Control::Undo) => {
                self.status_message = if self.session.undo() {
                    "Took back one move.".to_string()
                } else {
                    "Nothing to take back.".to_string()
                };
            }
            Action::Control(Control::Quit) => {
                info!("User quit");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Runs due timers, collects new notices and closes expired toasts.
    pub fn tick(&mut self, now: Instant) {
        if let Some(event) = self.session.poll_timers(now) {
            self.status_message = self.describe(event);
        }
        while let Ok(notice) = self.notices.try_recv() {
            self.toasts.push(notice, now);
        }
        let closed = self.toasts.prune(now);
        if closed > 0 {
            debug!(closed, "Toasts closed");
        }
    }

    /// Returns when the event loop should next wake without input.
    pub fn next_wakeup(&self, now: Instant) -> Instant {
        [self.session.next_deadline(), self.toasts.next_expiry()]
            .into_iter()
            .flatten()
            .fold(now + IDLE_TICK, Instant::min)
    }

    fn describe(&self, event: TimerEvent) -> String {
        let name = self.opponent_name();
        match event {
            TimerEvent::Reply(ReplyOutcome::Moved {
                mv,
                game_over: None,
            }) => format!("{} played {}. Your move.", name, mv),
            TimerEvent::Reply(ReplyOutcome::Moved {
                mv,
                game_over: Some(outcome),
            }) => format!("{} played {}. Game over: {}.", name, mv, outcome),
            TimerEvent::Reply(ReplyOutcome::GameOver(outcome)) => {
                format!("Game over: {}.", outcome)
            }
            TimerEvent::Reply(ReplyOutcome::Declined) => format!("{} did not move.", name),
            TimerEvent::AutoReset => "New game. Your move.".to_string(),
        }
    }

    fn opponent_name(&self) -> &str {
        self.session.opponent().name()
    }
}
