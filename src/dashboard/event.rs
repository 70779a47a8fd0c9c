//! Terminal input for the dashboard
//!
//! Raw crossterm events are narrowed to the few the dashboard reacts to before
//! they reach the loop. There is no tick: the screen only redraws after input,
//! and a burst of queued input is folded into a single redraw.

use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

/// Lines moved by one mouse wheel notch
pub const WHEEL_LINES: i32 = 3;

/// Input the dashboard acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Quote card scroll in lines (positive = down)
    Scroll(i32),
    /// The terminal changed size; only a redraw is needed
    Resize,
}

/// Narrow a crossterm event to dashboard input
///
/// Key releases, mouse moves and clicks, focus changes and pastes are dropped.
pub fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Event::Scroll(-WHEEL_LINES)),
            MouseEventKind::ScrollDown => Some(Event::Scroll(WHEEL_LINES)),
            _ => None,
        },
        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
        _ => None,
    }
}

/// Fold a batch of pending input
///
/// Adjacent scrolls are summed and repeated resizes collapse into one. Key
/// presses are kept in order since each may change the filter.
pub fn coalesce(events: impl IntoIterator<Item = Event>) -> Vec<Event> {
    let mut folded: Vec<Event> = Vec::new();
    for event in events {
        match (folded.last_mut(), event) {
            (Some(Event::Scroll(total)), Event::Scroll(delta)) => {
                *total = total.saturating_add(delta);
            }
            (Some(Event::Resize), Event::Resize) => {}
            (_, event) => folded.push(event),
        }
    }
    folded
}

/// Reads the crossterm event stream on a background task
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler and spawn its reader task
    ///
    /// The task ends once the handler is dropped or the stream fails.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();

            loop {
                tokio::select! {
                    _ = sender.closed() => break,
                    next = reader.next() => match next {
                        Some(Ok(raw)) => {
                            if let Some(event) = translate(raw) {
                                if sender.send(event).is_err() {
                                    break;
                                }
                            }
                        }
                        Some(Err(e)) => {
                            tracing::error!("Terminal event stream failed: {}", e);
                            break;
                        }
                        None => break,
                    },
                }
            }
        });

        Self { receiver }
    }

    /// Wait for the next batch of input
    ///
    /// Returns the first event together with everything already queued behind
    /// it, coalesced. `None` once the reader task has stopped.
    pub async fn next_batch(&mut self) -> Option<Vec<Event>> {
        let first = self.receiver.recv().await?;
        let mut pending = vec![first];
        while let Ok(event) = self.receiver.try_recv() {
            pending.push(event);
        }
        Some(coalesce(pending))
    }
}
