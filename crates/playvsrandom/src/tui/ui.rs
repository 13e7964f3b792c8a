//! Frame rendering: board, controls, status and toasts.

use std::time::Instant;

use playvsrandom_core::{SelectionState, SquareStyle};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strum::IntoEnumIterator;

use super::app::App;
use super::board::{BOARD_HEIGHT, BOARD_WIDTH, BoardGeometry, BoardView, legend_color};
use super::input::{Control, ScreenLayout};

/// Width of the panel right of the board.
const PANEL_WIDTH: u16 = 28;

/// Draws one frame and records its clickable regions in `app`.
pub fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Title
            Constraint::Min(BOARD_HEIGHT),    // Board and panel
            Constraint::Length(4),            // Status
        ])
        .split(area);

    let title = Paragraph::new("playvsrandom - chess against a random opponent")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH + 2),
            Constraint::Length(PANEL_WIDTH),
            Constraint::Min(0),
        ])
        .split(chunks[1]);

    let geometry = draw_board(frame, body[0], app);
    let buttons = draw_panel(frame, body[1], app, now);
    draw_status(frame, chunks[2], app);
    draw_toasts(frame, area, app);

    app.set_layout(ScreenLayout {
        board: geometry,
        buttons,
    });
}

/// Draws the board. Returns its geometry when it fits and can take clicks.
fn draw_board(frame: &mut Frame, area: Rect, app: &App) -> Option<BoardGeometry> {
    let session = app.session();
    let inner = Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), area.height);
    let geometry = BoardGeometry::new(inner, session.orientation());
    let overlays = session.overlays();
    frame.render_widget(
        BoardView {
            geometry,
            store: session.store(),
            overlays: &overlays,
        },
        inner,
    );
    geometry.fits(inner).then_some(geometry)
}

/// Draws controls, game info and the legend. Returns the button regions.
fn draw_panel(frame: &mut Frame, area: Rect, app: &App, now: Instant) -> Vec<(Control, Rect)> {
    let controls = Control::iter().count() as u16;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(controls + 2),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    let block = Block::default().title("Controls").borders(Borders::ALL);
    let inner = block.inner(sections[0]);
    frame.render_widget(block, sections[0]);
    let mut buttons = Vec::new();
    for (i, control) in Control::iter().enumerate() {
        let caption = control.caption();
        let rect = Rect::new(
            inner.x,
            inner.y + i as u16,
            (caption.len() as u16).min(inner.width),
            1,
        );
        if rect.bottom() > inner.bottom() {
            break;
        }
        frame.render_widget(
            Paragraph::new(caption).style(Style::default().fg(Color::Yellow)),
            rect,
        );
        buttons.push((control, rect));
    }

    let session = app.session();
    let selection = match session.selection() {
        SelectionState::Idle => "none".to_string(),
        SelectionState::Pending(source) => {
            format!("{} ({} moves)", source, session.selected_options().len())
        }
    };
    let info = vec![
        Line::from(format!("To move: {:?}", session.store().turn())),
        Line::from(format!("Selected: {}", selection)),
        Line::from(app.pending_message(now).unwrap_or_default()),
    ];
    frame.render_widget(
        Paragraph::new(info).block(Block::default().title("Game").borders(Borders::ALL)),
        sections[1],
    );

    let legend: Vec<Line> = SquareStyle::iter()
        .map(|style| {
            Line::from(vec![
                Span::styled("██ ", Style::default().fg(legend_color(style))),
                Span::raw(style.to_string().replace('_', " ")),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(legend).block(Block::default().title("Legend").borders(Borders::ALL)),
        sections[2],
    );

    buttons
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let text = vec![
        Line::from(app.status_message().to_string()),
        Line::from(Span::styled(
            app.session().fen(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let status = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

/// Stacks the visible toasts in the top-right corner, newest lowest.
fn draw_toasts(frame: &mut Frame, area: Rect, app: &App) {
    let mut y = area.y + 1;
    for toast in app.toasts().visible() {
        let width = (toast.notice.message.chars().count() as u16 + 4).min(area.width);
        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 3);
        if rect.bottom() > area.bottom() {
            break;
        }
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.notice.message.as_str())
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Magenta)),
                ),
            rect,
        );
        y += 3;
    }
}
