//! Tests for board hit-testing, input translation and rendering.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use playvsrandom::{
    Action, App, AppConfig, BOARD_HEIGHT, BOARD_WIDTH, BoardGeometry, CELL_HEIGHT, CELL_WIDTH,
    Control, ScreenLayout, draw, translate,
};
use playvsrandom_core::{Orientation, Square};
use ratatui::{Terminal, backend::TestBackend, layout::Rect};
use std::time::Instant;

fn geometry(orientation: Orientation) -> BoardGeometry {
    BoardGeometry::new(Rect::new(0, 0, BOARD_WIDTH, BOARD_HEIGHT), orientation)
}

/// Terminal position of the middle of the cell at (`row`, `col`).
fn cell_center(geometry: &BoardGeometry, row: u16, col: u16) -> (u16, u16) {
    let grid = geometry.grid();
    (
        grid.x + col * CELL_WIDTH + CELL_WIDTH / 2,
        grid.y + row * CELL_HEIGHT + CELL_HEIGHT / 2,
    )
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn test_white_orientation_corners() {
    let board = geometry(Orientation::White);
    assert_eq!(board.square_for_cell(0, 0), Square::A8);
    assert_eq!(board.square_for_cell(7, 0), Square::A1);
    assert_eq!(board.square_for_cell(7, 7), Square::H1);
    assert_eq!(board.square_for_cell(0, 7), Square::H8);
}

#[test]
fn test_black_orientation_corners() {
    let board = geometry(Orientation::Black);
    assert_eq!(board.square_for_cell(0, 0), Square::H1);
    assert_eq!(board.square_for_cell(7, 0), Square::H8);
    assert_eq!(board.square_for_cell(7, 7), Square::A8);
    assert_eq!(board.square_for_cell(0, 7), Square::A1);
}

#[test]
fn test_square_at_maps_cells() {
    let board = geometry(Orientation::White);
    let (x, y) = cell_center(&board, 6, 4);
    assert_eq!(board.square_at(x, y), Some(Square::E2));

    let flipped = geometry(Orientation::Black);
    assert_eq!(flipped.square_at(x, y), Some(Square::D7));
}

#[test]
fn test_square_at_outside_grid() {
    let board = geometry(Orientation::White);
    let grid = board.grid();
    assert_eq!(board.square_at(0, 0), None, "Rank label column");
    assert_eq!(board.square_at(grid.x, grid.bottom()), None, "File label row");
    assert_eq!(board.square_at(grid.right(), grid.y), None);
    assert_eq!(board.square_at(grid.x, grid.y), Some(Square::A8));
    assert_eq!(
        board.square_at(grid.right() - 1, grid.bottom() - 1),
        Some(Square::H1)
    );
}

#[test]
fn test_mouse_clicks_translate() {
    let board = geometry(Orientation::White);
    let layout = ScreenLayout {
        board: Some(board),
        buttons: vec![(Control::Reset, Rect::new(60, 2, 9, 1))],
    };
    let (x, y) = cell_center(&board, 6, 4);

    assert_eq!(
        translate(&mouse(MouseEventKind::Down(MouseButton::Left), x, y), &layout),
        Some(Action::Select(Square::E2))
    );
    assert_eq!(
        translate(&mouse(MouseEventKind::Down(MouseButton::Right), x, y), &layout),
        Some(Action::Annotate(Square::E2))
    );
    assert_eq!(
        translate(&mouse(MouseEventKind::Up(MouseButton::Left), x, y), &layout),
        None
    );
    assert_eq!(
        translate(&mouse(MouseEventKind::Down(MouseButton::Left), 62, 2), &layout),
        Some(Action::Control(Control::Reset))
    );
    assert_eq!(
        translate(&mouse(MouseEventKind::Down(MouseButton::Right), 62, 2), &layout),
        None,
        "Right clicks only annotate squares"
    );
    assert_eq!(
        translate(&mouse(MouseEventKind::Down(MouseButton::Left), 100, 40), &layout),
        None
    );
}

#[test]
fn test_keys_translate() {
    let layout = ScreenLayout::default();
    let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));

    assert_eq!(
        translate(&key(KeyCode::Char('r')), &layout),
        Some(Action::Control(Control::Reset))
    );
    assert_eq!(
        translate(&key(KeyCode::Char('F')), &layout),
        Some(Action::Control(Control::Flip))
    );
    assert_eq!(
        translate(&key(KeyCode::Char('u')), &layout),
        Some(Action::Control(Control::Undo))
    );
    assert_eq!(
        translate(&key(KeyCode::Esc), &layout),
        Some(Action::Control(Control::Quit))
    );
    assert_eq!(translate(&key(KeyCode::Char('x')), &layout), None);
}

#[test]
fn test_clicks_ignored_before_first_draw() {
    let layout = ScreenLayout::default();
    assert_eq!(
        translate(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), &layout),
        None
    );
}

fn render(app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("Terminal failed");
    let now = Instant::now();
    terminal
        .draw(|frame| draw(frame, app, now))
        .expect("Draw failed");
    terminal
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_draw_records_layout() {
    let mut app = App::new(&AppConfig::default()).expect("App failed");
    let terminal = render(&mut app, 100, 30);

    let board = app.layout().board.expect("Board should fit");
    assert_eq!(board.orientation(), Orientation::White);
    assert_eq!(app.layout().buttons.len(), 4);

    let text = screen_text(&terminal);
    assert!(text.contains("[r] Reset"));
    assert!(text.contains("[q] Quit"));
    assert!(text.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    assert!(text.contains("capture target"));
}

#[test]
fn test_draw_places_pieces() {
    let mut app = App::new(&AppConfig::default()).expect("App failed");
    let terminal = render(&mut app, 100, 30);
    let board = app.layout().board.expect("Board should fit");
    let (x, y) = cell_center(&board, 7, 4);
    let buffer = terminal.backend().buffer();

    assert_eq!(board.square_at(x, y), Some(Square::E1));
    let grid = board.grid();
    let glyph_x = grid.x + 4 * CELL_WIDTH + CELL_WIDTH / 2;
    let glyph_y = grid.y + 7 * CELL_HEIGHT + (CELL_HEIGHT - 1) / 2;
    assert_eq!(buffer[(glyph_x, glyph_y)].symbol(), "♚");
}

#[test]
fn test_small_terminal_disables_board_clicks() {
    let mut app = App::new(&AppConfig::default()).expect("App failed");
    render(&mut app, 30, 12);
    assert!(app.layout().board.is_none());
}
