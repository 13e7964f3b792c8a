//! Interaction core for playing chess against a random opponent.
//!
//! This crate turns raw square clicks into validated moves, drives the
//! opponent's delayed reply, and manages game-over and reset timing. Rendering
//! and notification display live outside; they read derived values and
//! receive fire-and-forget calls.
//!
//! # Architecture
//!
//! - **Position store**: the canonical position and undo history, wrapping `shakmaty`
//! - **Selection**: the `Idle`/`Pending(source)` click state machine
//! - **Annotations**: right-click square markers
//! - **Turn resolver**: schedules the opponent reply and the automatic reset
//! - **Session**: the owned state container tying the above together
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use playvsrandom_core::{GameSession, Notice, RandomOpponent, SessionConfig, Square};
//!
//! let mut session = GameSession::new(
//!     Default::default(),
//!     RandomOpponent::seeded("Random", 7),
//!     Vec::<Notice>::new(),
//!     SessionConfig::default(),
//! );
//!
//! let now = Instant::now();
//! session.left_click(Square::E2, now);
//! session.left_click(Square::E4, now);
//! assert!(session.pending_timer().is_some());
//!
//! session.poll_timers(now + Duration::from_millis(300));
//! assert_eq!(session.store().ply_count(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod annotation;
mod config;
mod error;
mod highlight;
mod notify;
mod opponent;
mod orientation;
mod position;
mod resolver;
mod selection;
mod session;
mod timer;

// Crate-level exports - Rules oracle types used across the API
pub use shakmaty::{Color, Piece, Role, Square};

// Crate-level exports - Position store
pub use position::{GameOutcome, MoveOption, PositionStore, PromotionPolicy};

// Crate-level exports - Interaction state
pub use annotation::AnnotationMap;
pub use highlight::{HighlightMap, SquareStyle, compose, last_move_layer, option_layer};
pub use orientation::Orientation;
pub use selection::{SelectionMachine, SelectionOutcome, SelectionState};

// Crate-level exports - Turn resolution
pub use notify::{Notice, NoticeKind, Notifier};
pub use opponent::{Opponent, RandomOpponent};
pub use resolver::{ReplyOutcome, TurnResolver};
pub use session::{GameSession, TimerEvent};
pub use timer::{PendingTimer, TimerKind, TimerSlot, TimerToken};

// Crate-level exports - Configuration and errors
pub use config::{DEFAULT_OPPONENT_DELAY, DEFAULT_RESET_DELAY, SessionConfig};
pub use error::{FenError, IllegalMove};
