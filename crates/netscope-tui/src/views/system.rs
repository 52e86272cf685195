use ratatui::style::Style;
use ratatui::text::{Line, Span};

use netscope_core::DiskUsage;

use super::{View, heading, note};
use crate::widgets::bytes_fmt::{fmt_byte_count, fmt_duration};
use crate::widgets::gauge::{gauge_cells, gauge_spans};

const GAUGE_WIDTH: usize = 40;

pub(super) fn render(view: &View<'_>) -> Vec<Line<'static>> {
    let theme = view.theme;
    let mut lines = Vec::from(heading("System Health", theme));
    let Some(system) = view.state.system() else {
        lines.push(note("System information not available yet", theme));
        return lines;
    };

    let percent = system.memory_used_percent();
    let style = view.theme.severity(view.config.bands.classify(percent));
    lines.push(gauge_line(view, "Memory:", percent, style));

    let [one, five, fifteen] = system.load_average;
    lines.extend([
        field(
            view,
            "Used:",
            format!(
                "{} / {}",
                fmt_byte_count(system.memory_used_bytes()),
                fmt_byte_count(system.memory_total_bytes)
            ),
        ),
        status_line(view, percent),
        field(view, "Load:", format!("{one:.2} {five:.2} {fifteen:.2}")),
        field(view, "CPUs:", system.cpu_count.to_string()),
        field(view, "Uptime:", fmt_duration(system.uptime)),
        Line::default(),
    ]);

    lines.extend(heading("Disk Usage", theme));
    match &system.disk {
        Some(disk) => lines.extend(disk_lines(view, disk)),
        None => lines.push(note("Unable to retrieve disk information", theme)),
    }
    lines
}

fn disk_lines(view: &View<'_>, disk: &DiskUsage) -> [Line<'static>; 6] {
    let percent = disk.used_percent();
    let style = view.theme.severity(view.config.bands.classify(percent));
    [
        field(view, "Path:", disk.path.display().to_string()),
        field(view, "Total:", fmt_byte_count(disk.total_bytes)),
        field(
            view,
            "Used:",
            format!("{} ({percent:.1}%)", fmt_byte_count(disk.used_bytes())),
        ),
        field(
            view,
            "Free:",
            format!(
                "{} ({:.1}%)",
                fmt_byte_count(disk.available_bytes),
                disk.free_percent()
            ),
        ),
        gauge_line(view, "Disk:", percent, style),
        status_line(view, percent),
    ]
}

fn gauge_line(view: &View<'_>, label: &str, percent: f64, style: Style) -> Line<'static> {
    let cells = gauge_cells(
        percent,
        GAUGE_WIDTH.min(view.width.saturating_sub(10)),
        &view.config.glyphs,
        view.ctx.now_millis,
    );
    let mut spans = vec![Span::styled(format!("{label:<10}"), view.theme.text)];
    spans.extend(gauge_spans(cells, style, view.theme.gauge_empty));
    spans.push(Span::styled(format!(" {percent:.1}%"), style));
    Line::from(spans)
}

/// Health label for `percent`, coloured by its band.
fn status_line(view: &View<'_>, percent: f64) -> Line<'static> {
    let severity = view.config.bands.classify(percent);
    Line::from(vec![
        Span::styled(format!("{:<10}", "Status:"), view.theme.text),
        Span::styled(severity.label(), view.theme.severity(severity)),
    ])
}

fn field(view: &View<'_>, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), view.theme.text),
        Span::styled(value, view.theme.text),
    ])
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::Theme;
    use crate::views::test_support::{dashboard, flatten_lines};
    use crate::views::{RenderContext, ViewConfig};
    use netscope_core::{DashboardState, DiskUsage, Event, SystemSnapshot, reduce};

    const GIB: u64 = 1024 * 1024 * 1024;

    fn lines(state: &DashboardState) -> Vec<String> {
        let theme = Theme::plain();
        let config = ViewConfig::default();
        let view = View {
            state,
            config: &config,
            theme: &theme,
            ctx: RenderContext::default(),
            width: 98,
        };
        flatten_lines(&render(&view))
    }

    fn snapshot(available_gib: u64) -> SystemSnapshot {
        SystemSnapshot {
            memory_total_bytes: 16 * GIB,
            memory_available_bytes: available_gib * GIB,
            load_average: [0.5, 0.25, 1.0],
            uptime: Duration::from_secs(90_061),
            cpu_count: 8,
            disk: Some(DiskUsage {
                path: PathBuf::from("/"),
                total_bytes: 512 * GIB,
                available_bytes: 128 * GIB,
            }),
        }
    }

    #[test]
    fn missing_snapshot_is_reported() {
        assert_eq!(
            lines(&dashboard(&[])),
            ["System Health", "", "System information not available yet"]
        );
    }

    #[test]
    fn snapshot_fields_are_listed() {
        let mut state = dashboard(&[]);
        reduce(&mut state, Event::SystemResult(snapshot(12)));
        let out = lines(&state);
        assert_eq!(
            out[2],
            format!("Memory:   {}{} 25.0%", "█".repeat(10), "░".repeat(30))
        );
        assert_eq!(
            &out[3..9],
            [
                "Used:     4.0 GB / 16.0 GB",
                "Status:   Healthy",
                "Load:     0.50 0.25 1.00",
                "CPUs:     8",
                "Uptime:   1day 1h 1m 1s",
                "",
            ]
        );
    }

    #[test]
    fn disk_usage_has_its_own_health_band() {
        let mut state = dashboard(&[]);
        reduce(&mut state, Event::SystemResult(snapshot(12)));
        let out = lines(&state);
        assert_eq!(
            &out[9..],
            [
                "Disk Usage".to_owned(),
                String::new(),
                "Path:     /".to_owned(),
                "Total:    512.0 GB".to_owned(),
                "Used:     384.0 GB (75.0%)".to_owned(),
                "Free:     128.0 GB (25.0%)".to_owned(),
                format!("Disk:     {}{} 75.0%", "█".repeat(30), "░".repeat(10)),
                "Status:   Warning".to_owned(),
            ]
        );
    }

    #[test]
    fn missing_disk_reading_is_noted() {
        let mut state = dashboard(&[]);
        reduce(
            &mut state,
            Event::SystemResult(SystemSnapshot {
                disk: None,
                ..snapshot(12)
            }),
        );
        assert_eq!(
            lines(&state).last().map(String::as_str),
            Some("Unable to retrieve disk information")
        );
    }

    #[test]
    fn memory_pressure_is_banded() {
        let mut state = dashboard(&[]);
        reduce(&mut state, Event::SystemResult(snapshot(4)));
        assert_eq!(lines(&state)[4], "Status:   Warning");
        reduce(&mut state, Event::SystemResult(snapshot(1)));
        assert_eq!(lines(&state)[4], "Status:   Critical");
    }
}
