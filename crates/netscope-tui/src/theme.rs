//! Neon palette and the semantic styles built from it.
//!
//! Views never reach for colours directly: they read a [`Theme`] value that
//! is built once at startup and passed down explicitly.

use ratatui::style::{Color, Modifier, Style};

use netscope_core::{Severity, TcpState};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd

/// Every style a view may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub section: Style,
    pub border: Style,
    pub text: Style,
    pub muted: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub key_hint: Style,
    pub key_hint_key: Style,
    pub table_header: Style,
    pub download: Style,
    pub upload: Style,
    pub gauge_empty: Style,
    pub running: Style,
    pub paused: Style,
    pub normal: Style,
    pub warning: Style,
    pub critical: Style,
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            title: Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD),
            section: Style::default()
                .fg(ELECTRIC_PURPLE)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(BORDER_GRAY),
            text: Style::default().fg(DIM_WHITE),
            muted: Style::default().fg(BORDER_GRAY),
            tab_active: Style::default()
                .fg(ELECTRIC_PURPLE)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(DIM_WHITE),
            key_hint: Style::default().fg(BORDER_GRAY),
            key_hint_key: Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD),
            table_header: Style::default()
                .fg(NEON_CYAN)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            download: Style::default().fg(LIGHT_BLUE),
            upload: Style::default().fg(CORAL),
            gauge_empty: Style::default().fg(BORDER_GRAY),
            running: Style::default()
                .fg(SUCCESS_GREEN)
                .add_modifier(Modifier::BOLD),
            paused: Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
            normal: Style::default().fg(SUCCESS_GREEN),
            warning: Style::default().fg(ELECTRIC_YELLOW),
            critical: Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
        }
    }

    /// No colours at all; emphasis only. Used with `--no-color`.
    pub fn plain() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            title: bold,
            section: bold,
            border: Style::default(),
            text: Style::default(),
            muted: Style::default().add_modifier(Modifier::DIM),
            tab_active: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            tab_inactive: Style::default(),
            key_hint: Style::default(),
            key_hint_key: bold,
            table_header: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            download: Style::default(),
            upload: Style::default(),
            gauge_empty: Style::default().add_modifier(Modifier::DIM),
            running: bold,
            paused: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            normal: Style::default(),
            warning: bold,
            critical: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        }
    }

    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Normal => self.normal,
            Severity::Warning => self.warning,
            Severity::Critical => self.critical,
        }
    }

    /// Established sockets read as download-coloured, listeners as upload.
    pub fn tcp_state(&self, state: TcpState) -> Style {
        match state {
            TcpState::Established => self.download,
            TcpState::Listen => self.upload,
            _ => self.muted,
        }
    }
}
