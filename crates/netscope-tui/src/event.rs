//! Terminal input reader running in a background tokio task.
//!
//! Key presses and resizes are translated into dashboard [`Event`]s and
//! pushed straight onto the event loop's queue, so they are ordered with
//! ticks and provider results.

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use netscope_core::Event;

use crate::keymap::map_key;

/// Translate one terminal event. Key releases/repeats, mouse and focus
/// events produce nothing.
pub fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            Some(Event::KeyPress(map_key(key)))
        }
        CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

/// Spawn the reader. It stops when `cancel` fires, the terminal stream
/// ends, or the queue is closed.
pub fn spawn_terminal_reader(
    events: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut stream = EventStream::new();
        loop {
            let next = tokio::select! {
                () = cancel.cancelled() => break,
                next = stream.next() => next,
            };
            let event = match next {
                Some(Ok(event)) => event,
                Some(Err(e)) => {
                    warn!(error = %e, "terminal read failed");
                    continue;
                }
                None => break,
            };
            let Some(event) = translate(event) else {
                continue;
            };
            if events.send(event).is_err() {
                break;
            }
        }
        debug!("terminal reader stopped");
    })
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;

    use netscope_core::Key;

    use super::*;

    #[test]
    fn presses_and_resizes_are_forwarded() {
        let press = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(
            translate(CrosstermEvent::Key(press)),
            Some(Event::KeyPress(Key::CycleTab))
        );
        assert_eq!(
            translate(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize {
                width: 120,
                height: 40
            })
        );
    }

    #[test]
    fn releases_and_focus_are_dropped() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(translate(CrosstermEvent::Key(release)), None);
        assert_eq!(translate(CrosstermEvent::FocusGained), None);
    }
}
