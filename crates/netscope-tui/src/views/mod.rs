//! Tab views: pure functions from [`DashboardState`] to a frame.
//!
//! Nothing here mutates state or reads the clock. The caller supplies the
//! animation time through [`RenderContext`], which keeps every view
//! reproducible in tests. Text tabs build styled lines; the Interfaces and
//! Connections tabs draw ratatui tables into their own area.

mod connections;
mod graph;
mod interfaces;
mod speed;
mod system;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph},
};

use netscope_config::DisplaySection;
use netscope_core::{DashboardState, SeverityBands, Tab};

use crate::theme::Theme;

pub const PLACEHOLDER: &str = "Initializing network monitor...";

/// Display settings, built once from the `[display]` config section.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub graph_height: u16,
    pub link_capacity_mbps: Option<f64>,
    pub bands: SeverityBands,
    pub glyphs: Vec<String>,
}

impl ViewConfig {
    pub fn from_display(display: &DisplaySection) -> Self {
        Self {
            graph_height: display.graph_height,
            link_capacity_mbps: display.link_capacity_mbps,
            bands: display.bands,
            glyphs: display.glyphs.clone(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::from_display(&DisplaySection::default())
    }
}

/// Per-frame inputs that do not live in the state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext {
    /// Wall-clock milliseconds; only drives the gauge animation.
    pub now_millis: u64,
}

/// Everything a tab view needs, bundled to keep signatures short.
pub(crate) struct View<'a> {
    pub state: &'a DashboardState,
    pub config: &'a ViewConfig,
    pub theme: &'a Theme,
    pub ctx: RenderContext,
    /// Usable width inside the border.
    pub width: usize,
}

/// Draw the whole screen into `area`: a bordered panel holding the header,
/// tab bar, selected tab and footer.
///
/// Before the first resize (zero viewport) the panel holds a one-line
/// placeholder.
pub fn render_screen(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    config: &ViewConfig,
    theme: &Theme,
    ctx: RenderContext,
) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.border)
        .title(Span::styled(" netscope ", theme.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !state.viewport().is_ready() {
        frame.render_widget(Paragraph::new(PLACEHOLDER), inner);
        return;
    }

    let [header, _, tabs, _, body, _, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let view = View {
        state,
        config,
        theme,
        ctx,
        width: usize::from(body.width),
    };
    frame.render_widget(Paragraph::new(header_line(&view)), header);
    frame.render_widget(Paragraph::new(tab_bar(&view)), tabs);
    match state.selected_tab() {
        Tab::Speed => render_lines(frame, body, speed::render(&view)),
        Tab::Interfaces => interfaces::render(frame, body, &view),
        Tab::Connections => connections::render(frame, body, &view),
        Tab::Graph => render_lines(frame, body, graph::render(&view)),
        Tab::System => render_lines(frame, body, system::render(&view)),
    }
    frame.render_widget(Paragraph::new(footer_line(theme)), footer);
}

fn render_lines(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn header_line(view: &View<'_>) -> Line<'static> {
    let theme = view.theme;
    let (status, style) = if view.state.is_running() {
        ("● RUNNING", theme.running)
    } else {
        ("● PAUSED", theme.paused)
    };
    let mut spans = vec![
        Span::styled("Network Speed Visualizer", theme.title),
        Span::raw("  "),
        Span::styled(status, style),
    ];
    if let Some(updated) = view.state.last_update() {
        spans.push(Span::styled(
            format!("  updated {}", updated.format("%H:%M:%S UTC")),
            theme.muted,
        ));
    }
    Line::from(spans)
}

fn tab_bar(view: &View<'_>) -> Line<'static> {
    let selected = view.state.selected_tab();
    let mut spans = Vec::with_capacity(Tab::COUNT * 2);
    for tab in Tab::ALL {
        if tab.index() > 0 {
            spans.push(Span::styled(" | ", view.theme.muted));
        }
        if tab == selected {
            spans.push(Span::styled(
                format!("[{}] {}", tab.number(), tab.label()),
                view.theme.tab_active,
            ));
        } else {
            spans.push(Span::styled(
                format!(" {}  {} ", tab.number(), tab.label()),
                view.theme.tab_inactive,
            ));
        }
    }
    Line::from(spans)
}

fn footer_line(theme: &Theme) -> Line<'static> {
    let hints = [
        ("1-5", "tabs"),
        ("Tab", "cycle"),
        ("r", "reset"),
        ("s", "start/stop"),
        ("q", "quit"),
    ];
    let mut spans = vec![Span::styled("Controls: ", theme.key_hint)];
    for (i, (key, action)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.key_hint));
        }
        spans.push(Span::styled(format!("[{key}]"), theme.key_hint_key));
        spans.push(Span::styled(format!(" {action}"), theme.key_hint));
    }
    Line::from(spans)
}

/// A section heading followed by a blank line.
pub(crate) fn heading(text: impl Into<String>, theme: &Theme) -> [Line<'static>; 2] {
    [Line::from(Span::styled(text.into(), theme.section)), Line::default()]
}

/// Plain explanatory line.
pub(crate) fn note(text: impl Into<String>, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.into(), theme.muted))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use ratatui::{
        Frame, Terminal,
        backend::TestBackend,
        buffer::Buffer,
        layout::Rect,
        text::Line,
    };

    use netscope_core::{DashboardState, EngineConfig, Event, Key, Sample, reduce};

    pub fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0)
            .single()
            .unwrap_or_default()
    }

    /// A running dashboard with `entities` registered and a 100x40 viewport.
    pub fn dashboard(entities: &[&str]) -> DashboardState {
        let config = EngineConfig {
            entities: entities.iter().map(|s| (*s).to_owned()).collect(),
            ..EngineConfig::default()
        };
        let mut state = DashboardState::new(&config, t(0));
        reduce(
            &mut state,
            Event::Resize {
                width: 100,
                height: 40,
            },
        );
        state
    }

    pub fn feed(state: &mut DashboardState, entity: &str, download: f64, upload: f64, at: i64) {
        reduce(
            state,
            Event::FetchResult {
                entity: entity.to_owned(),
                sample: Sample::new(download, upload, t(at)),
            },
        );
    }

    pub fn press(state: &mut DashboardState, key: Key) {
        reduce(state, Event::KeyPress(key));
    }

    pub fn flatten_line(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    pub fn flatten_lines(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(flatten_line).collect()
    }

    /// Draw onto an in-memory `width` x `height` terminal and return its rows
    /// with trailing blanks trimmed.
    pub fn draw(width: u16, height: u16, render: impl FnOnce(&mut Frame)) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(render).unwrap();
        let buffer = terminal.backend().buffer();
        buffer_rows(buffer, buffer.area)
    }

    pub fn buffer_rows(buffer: &Buffer, area: Rect) -> Vec<String> {
        (area.top()..area.bottom())
            .map(|y| {
                let row: String = (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect();
                row.trim_end().to_owned()
            })
            .collect()
    }
}
