use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Cell, Paragraph, Row},
};

use super::{View, heading, note};
use crate::widgets::table::{self, Column};

const COLUMNS: [Column; 4] = [
    Column::new("PROTO", 6),
    Column::new("LOCAL ADDRESS", 30),
    Column::new("REMOTE ADDRESS", 30),
    Column::new("STATE", 12),
];

pub(super) fn render(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let theme = view.theme;
    let connections = view.state.connections();
    let [title, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(Vec::from(heading("Active Connections", theme))),
        title,
    );

    // Busy hosts list thousands of sockets; keep the first screenful.
    let rows: Vec<Row> = connections
        .iter()
        .take(table::capacity(body))
        .map(|conn| {
            Row::new([
                Cell::from(conn.protocol.to_string()).style(theme.text),
                Cell::from(conn.local.clone()).style(theme.text),
                Cell::from(conn.remote.clone()).style(theme.text),
                Cell::from(conn.state.to_string()).style(theme.tcp_state(conn.state)),
            ])
        })
        .collect();
    let shown = rows.len();
    frame.render_widget(table::table(&COLUMNS, rows, theme.table_header), body);

    let summary = if connections.is_empty() {
        note("No connections reported", theme)
    } else {
        Line::styled(
            table::summary(shown, connections.len(), "connections"),
            theme.muted,
        )
    };
    frame.render_widget(Paragraph::new(summary), footer);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::Theme;
    use crate::views::test_support::{dashboard, draw, press};
    use crate::views::{RenderContext, ViewConfig};
    use netscope_core::{Connection, DashboardState, Event, Key, Protocol, TcpState, reduce};

    fn rows(state: &DashboardState, height: u16) -> Vec<String> {
        let theme = Theme::plain();
        let config = ViewConfig::default();
        draw(98, height, |frame| {
            let view = View {
                state,
                config: &config,
                theme: &theme,
                ctx: RenderContext::default(),
                width: 98,
            };
            let area = frame.area();
            render(frame, area, &view);
        })
    }

    fn cells(row: &str) -> Vec<&str> {
        row.split_whitespace().collect()
    }

    fn sample_connections() -> Vec<Connection> {
        vec![
            Connection::new(Protocol::Tcp, "0.0.0.0:22", "*:*", TcpState::Listen),
            Connection::new(
                Protocol::Tcp6,
                "[::1]:631",
                "[::1]:50000",
                TcpState::Established,
            ),
        ]
    }

    #[test]
    fn lists_connections_in_reported_order() {
        let mut state = dashboard(&[]);
        reduce(&mut state, Event::ConnectionsResult(sample_connections()));
        let out = rows(&state, 8);
        assert_eq!(out[0], "Active Connections");
        assert_eq!(
            cells(&out[2]),
            ["PROTO", "LOCAL", "ADDRESS", "REMOTE", "ADDRESS", "STATE"]
        );
        assert_eq!(cells(&out[3]), ["TCP", "0.0.0.0:22", "*:*", "LISTEN"]);
        assert_eq!(
            cells(&out[4]),
            ["TCP6", "[::1]:631", "[::1]:50000", "ESTABLISHED"]
        );
        assert_eq!(out[7], "2 connections");
    }

    #[test]
    fn long_socket_tables_are_cut_to_the_area() {
        let mut state = dashboard(&[]);
        let many: Vec<Connection> = (0..20)
            .map(|port| {
                Connection::new(
                    Protocol::Tcp,
                    format!("10.0.0.1:{}", 8000 + port),
                    "*:*",
                    TcpState::Listen,
                )
            })
            .collect();
        reduce(&mut state, Event::ConnectionsResult(many));

        let out = rows(&state, 10);
        // 10 rows: heading (2), header (1), six sockets, summary.
        assert_eq!(cells(&out[3])[1], "10.0.0.1:8000");
        assert_eq!(cells(&out[8])[1], "10.0.0.1:8005");
        assert_eq!(out[9], "showing 6 of 20 connections");
    }

    #[test]
    fn paused_dashboard_keeps_previous_snapshot() {
        let mut state = dashboard(&[]);
        press(&mut state, Key::ToggleRun);
        reduce(&mut state, Event::ConnectionsResult(sample_connections()));
        let out = rows(&state, 6);
        assert_eq!(out[3], "");
        assert_eq!(out[5], "No connections reported");
    }
}
