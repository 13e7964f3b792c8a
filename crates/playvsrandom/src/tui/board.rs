//! Chess board rendering and mouse hit-testing.

use playvsrandom_core::{
    Color as Side, HighlightMap, Orientation, Piece, PositionStore, Role, Square, SquareStyle,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use shakmaty::{File, Rank};

/// Terminal columns per board square.
pub const CELL_WIDTH: u16 = 5;
/// Terminal rows per board square.
pub const CELL_HEIGHT: u16 = 2;
/// Columns reserved left of the grid for rank labels.
const RANK_LABEL_WIDTH: u16 = 2;
/// Rows reserved below the grid for file labels.
const FILE_LABEL_HEIGHT: u16 = 1;

/// Width of the board including rank labels.
pub const BOARD_WIDTH: u16 = RANK_LABEL_WIDTH + CELL_WIDTH * 8;
/// Height of the board including file labels.
pub const BOARD_HEIGHT: u16 = CELL_HEIGHT * 8 + FILE_LABEL_HEIGHT;

const LIGHT_SQUARE: Color = Color::Rgb(240, 217, 181);
const DARK_SQUARE: Color = Color::Rgb(181, 136, 99);

/// Where the 8x8 grid sits on screen and which way up it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    grid: Rect,
    orientation: Orientation,
}

impl BoardGeometry {
    /// Places the board (labels included) at the top-left of `area`.
    pub fn new(area: Rect, orientation: Orientation) -> Self {
        let grid = Rect::new(
            area.x + RANK_LABEL_WIDTH,
            area.y,
            CELL_WIDTH * 8,
            CELL_HEIGHT * 8,
        );
        Self { grid, orientation }
    }

    /// Returns the rectangle covered by the squares, labels excluded.
    pub fn grid(&self) -> Rect {
        self.grid
    }

    /// Returns the orientation the board is drawn in.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the square drawn at grid cell (`row`, `col`), counted from the top-left.
    pub fn square_for_cell(&self, row: u16, col: u16) -> Square {
        let (file, rank) = match self.orientation {
            Orientation::White => (u32::from(col), 7 - u32::from(row)),
            Orientation::Black => (7 - u32::from(col), u32::from(row)),
        };
        Square::from_coords(File::new(file), Rank::new(rank))
    }

    /// Returns the square under terminal position (`column`, `row`), if any.
    pub fn square_at(&self, column: u16, row: u16) -> Option<Square> {
        let inside = column >= self.grid.x
            && column < self.grid.right()
            && row >= self.grid.y
            && row < self.grid.bottom();
        if !inside {
            return None;
        }
        let cell_row = (row - self.grid.y) / CELL_HEIGHT;
        let cell_col = (column - self.grid.x) / CELL_WIDTH;
        Some(self.square_for_cell(cell_row, cell_col))
    }

    /// Returns `true` if the board, labels included, fits inside `area`.
    pub fn fits(&self, area: Rect) -> bool {
        self.grid.right() <= area.right()
            && self.grid.bottom() + FILE_LABEL_HEIGHT <= area.bottom()
    }

    /// Returns the screen rectangle of grid cell (`row`, `col`).
    fn cell_rect(&self, row: u16, col: u16) -> Rect {
        Rect::new(
            self.grid.x + col * CELL_WIDTH,
            self.grid.y + row * CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        )
    }
}

/// Snapshot of what the board shows, drawn as a widget.
pub struct BoardView<'a> {
    /// Screen placement and orientation.
    pub geometry: BoardGeometry,
    /// Position whose pieces are drawn.
    pub store: &'a PositionStore,
    /// Combined overlay styles.
    pub overlays: &'a HighlightMap,
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let grid = self.geometry.grid();
        if !self.geometry.fits(area) {
            buf.set_string(
                area.x,
                area.y,
                "Terminal too small for the board",
                Style::default().fg(Color::Red),
            );
            return;
        }

        for row in 0..8 {
            for col in 0..8 {
                let square = self.geometry.square_for_cell(row, col);
                let rect = self.geometry.cell_rect(row, col);
                let base = if square.is_light() {
                    LIGHT_SQUARE
                } else {
                    DARK_SQUARE
                };
                let style = self.overlays.get(&square).copied();
                buf.set_style(rect, Style::default().bg(background(base, style)));

                let (glyph, fg) = match (self.store.piece_at(square), style) {
                    (Some(piece), _) => (glyph(piece), piece_color(piece.color)),
                    (None, Some(SquareStyle::Target)) => ('·', Color::Rgb(60, 60, 60)),
                    (None, _) => (' ', Color::Reset),
                };
                let x = rect.x + CELL_WIDTH / 2;
                let y = rect.y + (CELL_HEIGHT - 1) / 2;
                buf.set_string(
                    x,
                    y,
                    glyph.to_string(),
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                );
            }

            let label = self.geometry.square_for_cell(row, 0).rank().char();
            buf.set_string(
                grid.x - RANK_LABEL_WIDTH,
                grid.y + row * CELL_HEIGHT + (CELL_HEIGHT - 1) / 2,
                label.to_string(),
                Style::default().fg(Color::DarkGray),
            );
        }

        for col in 0..8 {
            let label = self.geometry.square_for_cell(0, col).file().char();
            buf.set_string(
                grid.x + col * CELL_WIDTH + CELL_WIDTH / 2,
                grid.bottom(),
                label.to_string(),
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}

fn background(base: Color, style: Option<SquareStyle>) -> Color {
    match style {
        None | Some(SquareStyle::Target) => base,
        Some(SquareStyle::LastMove) => Color::Rgb(205, 210, 106),
        Some(SquareStyle::Source) => Color::Rgb(246, 246, 105),
        Some(SquareStyle::CaptureTarget) => Color::Rgb(214, 110, 96),
        Some(SquareStyle::Annotation) => Color::Rgb(96, 128, 255),
    }
}

fn piece_color(side: Side) -> Color {
    match side {
        Side::White => Color::White,
        Side::Black => Color::Black,
    }
}

/// Returns the glyph drawn for `piece`; solid shapes read best on coloured squares.
pub fn glyph(piece: Piece) -> char {
    match piece.role {
        Role::King => '♚',
        Role::Queen => '♛',
        Role::Rook => '♜',
        Role::Bishop => '♝',
        Role::Knight => '♞',
        Role::Pawn => '♟',
    }
}

/// Returns the swatch colour used for `style` in the legend.
pub fn legend_color(style: SquareStyle) -> Color {
    match style {
        SquareStyle::Target => Color::Rgb(60, 60, 60),
        other => background(DARK_SQUARE, Some(other)),
    }
}
