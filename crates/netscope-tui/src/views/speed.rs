use chrono::TimeDelta;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use netscope_core::Entity;

use super::{View, heading, note};
use crate::widgets::bytes_fmt::{fmt_byte_count, fmt_duration, fmt_mbps, fmt_rate};
use crate::widgets::gauge::{gauge_cells, gauge_spans, headroom_percent};

const LABEL_WIDTH: usize = 10;

/// Bars stretch with the terminal, leaving room for the label and value.
fn bar_width(width: usize) -> usize {
    if width > 80 {
        width - 30
    } else {
        width.saturating_sub(30).min(50)
    }
}

pub(super) fn render(view: &View<'_>) -> Vec<Line<'static>> {
    let theme = view.theme;
    let Some(entity) = view.state.primary_entity() else {
        return vec![note("No network interface data available", theme)];
    };

    let mut lines = Vec::from(heading(
        format!("Current Network Speed · {}", entity.name()),
        theme,
    ));

    let observed = entity.is_observed();
    let speed = |rate: f64| {
        if observed {
            fmt_mbps(rate)
        } else {
            "n/a".to_owned()
        }
    };
    lines.push(Line::from(vec![
        Span::styled("▼ ", theme.download),
        Span::styled(format!("Download: {}", speed(entity.download_rate())), theme.text),
    ]));
    lines.push(Line::from(vec![
        Span::styled("▲ ", theme.upload),
        Span::styled(format!("Upload:   {}", speed(entity.upload_rate())), theme.text),
    ]));
    lines.push(Line::default());

    let aggregates = view.state.aggregates();
    lines.push(rate_bar(
        view,
        "Download:",
        entity.download_rate(),
        aggregates.max_download(),
        theme.download,
    ));
    lines.push(rate_bar(
        view,
        "Upload:",
        entity.upload_rate(),
        aggregates.max_upload(),
        theme.upload,
    ));
    if let Some(capacity) = view.config.link_capacity_mbps {
        lines.push(link_bar(view, entity, capacity));
    }
    lines.push(Line::default());

    lines.extend(heading("Session Statistics", theme));
    let started = view.state.session_started();
    let elapsed = view
        .state
        .last_update()
        .map_or(TimeDelta::zero(), |now| now - started)
        .to_std()
        .unwrap_or_default();
    for (label, value) in [
        ("Total Downloaded:", fmt_byte_count(aggregates.total_download())),
        ("Total Uploaded:", fmt_byte_count(aggregates.total_upload())),
        ("Peak Download:", fmt_mbps(aggregates.max_download())),
        ("Peak Upload:", fmt_mbps(aggregates.max_upload())),
        ("Duration:", fmt_duration(elapsed)),
    ] {
        lines.push(Line::from(Span::styled(format!("{label:<18}{value}"), theme.text)));
    }
    lines
}

fn rate_bar(view: &View<'_>, label: &str, rate: f64, peak: f64, fill: Style) -> Line<'static> {
    let cells = gauge_cells(
        headroom_percent(rate, peak),
        bar_width(view.width),
        &view.config.glyphs,
        view.ctx.now_millis,
    );
    let mut spans = vec![Span::styled(format!("{label:<LABEL_WIDTH$}"), view.theme.text)];
    spans.extend(gauge_spans(cells, fill, view.theme.gauge_empty));
    spans.push(Span::styled(format!(" {}", fmt_rate(rate)), view.theme.text));
    Line::from(spans)
}

/// Utilisation of the busier direction against the nominal link speed.
fn link_bar(view: &View<'_>, entity: &Entity, capacity_mbps: f64) -> Line<'static> {
    let busiest_bits = entity.download_rate().max(entity.upload_rate()) * 8.0;
    let percent = busiest_bits / (capacity_mbps * 1_000_000.0) * 100.0;
    let severity = view.config.bands.classify(percent);
    let style = view.theme.severity(severity);
    let cells = gauge_cells(
        percent,
        bar_width(view.width),
        &view.config.glyphs,
        view.ctx.now_millis,
    );
    let mut spans = vec![Span::styled(format!("{:<LABEL_WIDTH$}", "Link:"), view.theme.text)];
    spans.extend(gauge_spans(cells, style, view.theme.gauge_empty));
    spans.push(Span::styled(
        format!(
            " {:.1}% of {capacity_mbps} Mbps {}",
            netscope_core::clamp_percent(percent),
            severity.label()
        ),
        style,
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::Theme;
    use crate::views::test_support::{dashboard, feed, flatten_lines, t};
    use crate::views::{RenderContext, ViewConfig};
    use netscope_core::{DashboardState, Event, reduce};

    fn lines(state: &DashboardState, config: &ViewConfig) -> Vec<String> {
        let theme = Theme::plain();
        let view = View {
            state,
            config,
            theme: &theme,
            ctx: RenderContext::default(),
            width: 80,
        };
        flatten_lines(&render(&view))
    }

    #[test]
    fn no_entities_reports_missing_data() {
        let state = dashboard(&[]);
        assert_eq!(
            lines(&state, &ViewConfig::default()),
            ["No network interface data available"]
        );
    }

    #[test]
    fn unobserved_entity_shows_na() {
        let state = dashboard(&["eth0"]);
        let out = lines(&state, &ViewConfig::default());
        assert_eq!(out[0], "Current Network Speed · eth0");
        assert_eq!(out[2], "▼ Download: n/a");
        assert_eq!(out[3], "▲ Upload:   n/a");
    }

    #[test]
    fn bars_and_statistics_follow_samples() {
        let mut state = dashboard(&["eth0"]);
        feed(&mut state, "eth0", 131_072.0, 65_536.0, 1);
        reduce(&mut state, Event::Tick { time: t(75) });
        let out = lines(&state, &ViewConfig::default());

        assert_eq!(out[2], "▼ Download: 1.00 Mbps");
        assert_eq!(out[3], "▲ Upload:   0.50 Mbps");
        // 50-cell bar at 1/1.2 of scale: 41 cells filled.
        let expected = format!("Download: {}{} 128.0 KB/s", "█".repeat(41), "░".repeat(9));
        assert_eq!(out[5], expected);
        assert!(out.contains(&"Total Downloaded: 64.0 KB".to_owned()));
        assert!(out.contains(&"Peak Upload:      0.50 Mbps".to_owned()));
        assert!(out.contains(&"Duration:         1m 15s".to_owned()));
    }

    #[test]
    fn link_gauge_uses_severity_bands() {
        let mut state = dashboard(&["eth0"]);
        // 90 Mbit/s on a 100 Mbit/s link.
        feed(&mut state, "eth0", 90_000_000.0 / 8.0, 0.0, 1);
        let config = ViewConfig {
            link_capacity_mbps: Some(100.0),
            ..ViewConfig::default()
        };
        let out = lines(&state, &config);
        let link = out.iter().find(|l| l.starts_with("Link:")).cloned().unwrap_or_default();
        assert!(link.ends_with("90.0% of 100 Mbps Critical"), "{link}");
    }

    #[test]
    fn bar_width_tracks_terminal() {
        assert_eq!(bar_width(120), 90);
        assert_eq!(bar_width(80), 50);
        assert_eq!(bar_width(60), 30);
        assert_eq!(bar_width(10), 0);
    }
}
