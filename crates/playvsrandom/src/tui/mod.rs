//! Terminal UI: a mouse-driven chess board against a random opponent.

mod app;
mod board;
mod input;
mod toast;
mod ui;

pub use app::{App, IDLE_TICK, Session};
pub use board::{
    BOARD_HEIGHT, BOARD_WIDTH, BoardGeometry, BoardView, CELL_HEIGHT, CELL_WIDTH, glyph,
};
pub use input::{Action, Control, ScreenLayout, translate};
pub use toast::{ChannelNotifier, MAX_VISIBLE, Toast, Toasts};
pub use ui::draw;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, error, info, instrument, warn};

use crate::config::AppConfig;

/// How long the input reader blocks before checking whether the UI is gone.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Runs the terminal client until the user quits.
#[instrument(skip_all)]
pub async fn run(config: AppConfig) -> Result<()> {
    let mut app = App::new(&config)?;

    info!("Starting terminal UI");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    let reader = tokio::task::spawn_blocking(move || read_input(input_tx));

    let res = run_app(&mut terminal, &mut app, &mut input_rx).await;

    drop(input_rx);
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = reader.await {
        warn!(error = %e, "Input reader did not shut down cleanly");
    }
    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Forwards terminal events until the receiving side closes.
fn read_input(tx: mpsc::UnboundedSender<io::Result<Event>>) {
    debug!("Input reader started");
    while !tx.is_closed() {
        let event = match event::poll(INPUT_POLL) {
            Ok(false) => continue,
            Ok(true) => event::read(),
            Err(e) => Err(e),
        };
        let failed = event.is_err();
        if tx.send(event).is_err() || failed {
            break;
        }
    }
    debug!("Input reader stopped");
}

/// Draws, then waits for input or the next deadline, whichever comes first.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    input: &mut mpsc::UnboundedReceiver<io::Result<Event>>,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| ui::draw(frame, app, now))?;

        let wakeup = time::Instant::from_std(app.next_wakeup(now));
        tokio::select! {
            received = input.recv() => {
                let Some(event) = received else {
                    warn!("Input channel closed");
                    return Ok(());
                };
                if let Some(action) = translate(&event?, app.layout())
                    && app.handle(action, Instant::now()).is_break()
                {
                    return Ok(());
                }
            }
            _ = time::sleep_until(wakeup) => {}
        }
    }
}
