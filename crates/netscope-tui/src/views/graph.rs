use ratatui::text::{Line, Span};

use super::{View, heading, note};
use crate::widgets::bytes_fmt::fmt_rate;
use crate::widgets::graph::{GraphCell, threshold_scan};

const AXIS_LABEL_WIDTH: usize = 11;

/// Columns available for plotting at a given inner width.
fn graph_width(width: usize) -> usize {
    if width > 80 {
        width - 20
    } else {
        width.saturating_sub(20).min(60)
    }
}

pub(super) fn render(view: &View<'_>) -> Vec<Line<'static>> {
    let theme = view.theme;
    let Some(entity) = view.state.primary_entity() else {
        return vec![note("No history data available yet...", theme)];
    };
    let mut lines = Vec::from(heading(
        format!("Speed History Graph · {}", entity.name()),
        theme,
    ));
    let history = entity.history();
    if history.is_empty() {
        lines.push(note("No history data available yet...", theme));
        return lines;
    }

    lines.push(Line::from(Span::styled(
        format!("Speed over the last {} samples:", history.len()),
        theme.text,
    )));
    lines.push(Line::default());

    let width = graph_width(view.width);
    for row in threshold_scan(history, width, usize::from(view.config.graph_height)) {
        let mut spans = vec![Span::styled(
            format!("{:>AXIS_LABEL_WIDTH$} │", fmt_rate(row.threshold)),
            theme.muted,
        )];
        spans.extend(row.cells.into_iter().map(|cell| match cell {
            GraphCell::Download => Span::styled("▓", theme.download),
            GraphCell::Upload => Span::styled("░", theme.upload),
            GraphCell::Empty => Span::raw(" "),
        }));
        lines.push(Line::from(spans));
    }

    let gutter = " ".repeat(AXIS_LABEL_WIDTH + 1);
    lines.push(Line::from(Span::styled(
        format!("{gutter}└{}", "─".repeat(width)),
        theme.muted,
    )));
    lines.push(Line::from(Span::styled(
        format!("{gutter}{:>width$}", "Time →", width = width + 1),
        theme.muted,
    )));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Legend: ", theme.text),
        Span::styled("▓ Download", theme.download),
        Span::raw(" "),
        Span::styled("░ Upload", theme.upload),
    ]));
    lines
}
