//! Application core: drives the event loop and redraws at a fixed rate.

use std::time::Duration;

use chrono::Utc;
use color_eyre::eyre::Result;
use tracing::{info, warn};

use netscope_core::{Event, EventLoop};

use crate::event::spawn_terminal_reader;
use crate::theme::Theme;
use crate::tui::Screen;
use crate::views::{RenderContext, ViewConfig};

/// Redraw interval (~10 FPS). Drawing only reads state; the rate exists for
/// the gauge animation.
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

enum Step {
    Event(Option<Event>),
    Render,
}

pub struct App {
    event_loop: EventLoop,
    view_config: ViewConfig,
    theme: Theme,
}

impl App {
    pub fn new(event_loop: EventLoop, view_config: ViewConfig, theme: Theme) -> Self {
        Self {
            event_loop,
            view_config,
            theme,
        }
    }

    /// Run until quit. The terminal is restored on every exit path.
    pub async fn run(&mut self) -> Result<()> {
        let mut screen = Screen::open()?;

        let events = self.event_loop.sender();
        events.send(screen.resize_event())?;

        let cancel = self.event_loop.cancel_token();
        let reader = spawn_terminal_reader(events, cancel.clone());

        let mut render_interval = tokio::time::interval(RENDER_INTERVAL);
        render_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("TUI event loop started");
        if self.event_loop.start().is_continue() {
            loop {
                let step = tokio::select! {
                    event = self.event_loop.next_event() => Step::Event(event),
                    _ = render_interval.tick() => Step::Render,
                };
                match step {
                    Step::Event(Some(event)) => {
                        if self.event_loop.apply(event).is_break() {
                            break;
                        }
                    }
                    Step::Event(None) => break,
                    Step::Render => screen.render(
                        self.event_loop.state(),
                        &self.view_config,
                        &self.theme,
                        render_context(),
                    )?,
                }
            }
        }

        cancel.cancel();
        if let Err(err) = reader.await {
            warn!(error = %err, "terminal reader task failed");
        }
        info!("TUI event loop ended");
        Ok(())
    }
}

fn render_context() -> RenderContext {
    RenderContext {
        now_millis: u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default(),
    }
}
