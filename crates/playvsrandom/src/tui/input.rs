//! Translation of terminal events into game actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use playvsrandom_core::Square;
use ratatui::layout::{Position, Rect};
use strum::{EnumIter, IntoEnumIterator};
use tracing::debug;

use super::board::BoardGeometry;

/// Buttons and keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum Control {
    /// Back to the standard start.
    Reset,
    /// Swap which side is drawn at the bottom.
    Flip,
    /// Take back one move.
    Undo,
    /// Leave the program.
    Quit,
}

impl Control {
    /// Returns the keyboard shortcut.
    pub fn key(self) -> char {
        match self {
            Self::Reset => 'r',
            Self::Flip => 'f',
            Self::Undo => 'u',
            Self::Quit => 'q',
        }
    }

    /// Returns the button caption, shortcut included.
    pub fn caption(self) -> String {
        format!("[{}] {}", self.key(), self)
    }

    fn from_key(c: char) -> Option<Self> {
        Self::iter().find(|control| control.key() == c.to_ascii_lowercase())
    }
}

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Left click on a board square.
    Select(Square),
    /// Right click on a board square.
    Annotate(Square),
    /// A button press or shortcut.
    Control(Control),
}

/// Clickable regions from the last draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    /// The board, once drawn.
    pub board: Option<BoardGeometry>,
    /// Button regions.
    pub buttons: Vec<(Control, Rect)>,
}

impl ScreenLayout {
    /// Returns the button under (`column`, `row`).
    pub fn button_at(&self, column: u16, row: u16) -> Option<Control> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
            .map(|(control, _)| *control)
    }

    /// Returns the board square under (`column`, `row`).
    pub fn square_at(&self, column: u16, row: u16) -> Option<Square> {
        self.board?.square_at(column, row)
    }
}

/// Maps a terminal event onto an action. Unbound keys, mouse releases and
/// clicks outside the board and buttons map to `None`.
pub fn translate(event: &Event, layout: &ScreenLayout) -> Option<Action> {
    let action = match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, layout),
        _ => None,
    };
    if let Some(action) = &action {
        debug!(?action, "Input translated");
    }
    action
}

fn translate_key(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(Action::Control(Control::Quit)),
        KeyCode::Char(c) => Control::from_key(c).map(Action::Control),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent, layout: &ScreenLayout) -> Option<Action> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => layout
            .button_at(column, row)
            .map(Action::Control)
            .or_else(|| layout.square_at(column, row).map(Action::Select)),
        MouseEventKind::Down(MouseButton::Right) => {
            layout.square_at(column, row).map(Action::Annotate)
        }
        _ => None,
    }
}
