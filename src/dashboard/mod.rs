//! Interactive terminal dashboard over a loaded snapshot
//!
//! The collection is held in memory for the whole session. Every change to
//! the search text or a selector runs a fresh query; nothing is cached
//! between filter states.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::dashboard::app::App;
use crate::dashboard::event::EventHandler;
use crate::dashboard::ui::draw;
use crate::query::QueryLimits;
use crate::record::QuoteRecord;
use crate::ScopeError;

/// Run the dashboard until the user quits
///
/// The terminal is restored even when drawing fails, and also when setup
/// fails after raw mode was enabled.
pub async fn run(records: Vec<QuoteRecord>, limits: QueryLimits) -> Result<(), ScopeError> {
    enable_raw_mode()?;
    let mut terminal = undo_on_err(setup_terminal(), restore_after_failed_setup)?;

    let app = App::new(records, limits);
    tracing::debug!(
        "Dashboard started with {} records",
        app.collection_len()
    );

    let result = event_loop(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Best effort: the setup error is the one reported
fn restore_after_failed_setup() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = disable_raw_mode();
}

/// Run `undo` when `result` is an error, then pass the result through
fn undo_on_err<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<(), ScopeError> {
    let mut events = EventHandler::new();
    terminal.clear()?;

    while !app.should_quit {
        terminal.draw(|f| draw(f, &app))?;

        let Some(batch) = events.next_batch().await else {
            break;
        };
        for event in batch {
            app.handle_event(event);
            if app.should_quit {
                break;
            }
        }
    }

    Ok(())
}
