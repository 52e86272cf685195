//! The terminal session the dashboard draws into.

use color_eyre::eyre::Result;
use ratatui::{DefaultTerminal, layout::Size};

use netscope_core::{DashboardState, Event};

use crate::theme::Theme;
use crate::views::{RenderContext, ViewConfig, render_screen};

/// Size assumed when the terminal cannot report one.
const FALLBACK_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Raw-mode alternate screen, restored on drop and on panic.
pub struct Screen {
    terminal: DefaultTerminal,
}

impl Screen {
    pub fn open() -> Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self { terminal })
    }

    /// Seeds the dashboard viewport. Later changes arrive as crossterm
    /// resize events.
    pub fn resize_event(&self) -> Event {
        let Size { width, height } = self.terminal.size().unwrap_or(FALLBACK_SIZE);
        Event::Resize { width, height }
    }

    pub fn render(
        &mut self,
        state: &DashboardState,
        config: &ViewConfig,
        theme: &Theme,
        ctx: RenderContext,
    ) -> Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            render_screen(frame, area, state, config, theme, ctx);
        })?;
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// color-eyre reports for errors and panics. Call before [`Screen::open`]:
/// its panic hook then runs after the terminal has been restored.
pub fn install_hooks() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install()
}
