use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Cell, Paragraph, Row},
};

use super::{View, heading, note};
use crate::widgets::bytes_fmt::fmt_rate;
use crate::widgets::table::{self, Column};

const COLUMNS: [Column; 5] = [
    Column::new("INTERFACE", 12),
    Column::new("DOWNLOAD", 15),
    Column::new("UPLOAD", 15),
    Column::new("SAMPLES", 8),
    Column::new("STATUS", 6),
];

pub(super) fn render(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let theme = view.theme;
    let state = view.state;
    let [title, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(Vec::from(heading("Network Interfaces", theme))),
        title,
    );

    let rows: Vec<Row> = state
        .entities()
        .take(table::capacity(body))
        .map(|entity| {
            let (download, upload, status, status_style) = if entity.is_observed() {
                (
                    fmt_rate(entity.download_rate()),
                    fmt_rate(entity.upload_rate()),
                    "live",
                    theme.normal,
                )
            } else {
                ("n/a".to_owned(), "n/a".to_owned(), "n/a", theme.muted)
            };
            let history = entity.history();
            Row::new([
                Cell::from(entity.name().to_owned()).style(theme.text),
                Cell::from(download).style(theme.download),
                Cell::from(upload).style(theme.upload),
                Cell::from(format!("{}/{}", history.len(), history.capacity())).style(theme.text),
                Cell::from(status).style(status_style),
            ])
        })
        .collect();
    let shown = rows.len();
    frame.render_widget(table::table(&COLUMNS, rows, theme.table_header), body);

    let summary = if state.entity_count() == 0 {
        note("No interfaces registered yet", theme)
    } else {
        Line::styled(
            table::summary(shown, state.entity_count(), "interfaces"),
            theme.muted,
        )
    };
    frame.render_widget(Paragraph::new(summary), footer);
}
