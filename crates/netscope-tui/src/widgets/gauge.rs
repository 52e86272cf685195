//! Percentage bar with an animated leading edge.

use ratatui::style::Style;
use ratatui::text::Span;

use netscope_core::clamp_percent;

pub const SOLID: &str = "█";
pub const EMPTY: &str = "░";

/// Milliseconds each animation frame stays on screen.
const FRAME_MILLIS: u64 = 200;

/// Cell layout of one gauge: `solid` full cells, then the animated edge
/// cell if anything is filled, then `empty` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaugeCells {
    pub solid: usize,
    pub edge: Option<String>,
    pub empty: usize,
}

/// Lay out a `width`-cell gauge for `percent` (clamped to 0..=100).
///
/// `filled = floor(width * percent / 100)`; the last filled cell shows
/// `glyphs[(now_millis / 200) % glyphs.len()]`. The edge falls back to
/// [`SOLID`] if `glyphs` is empty.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn gauge_cells(percent: f64, width: usize, glyphs: &[String], now_millis: u64) -> GaugeCells {
    let percent = clamp_percent(percent);
    let filled = ((width as f64 * percent / 100.0).floor() as usize).min(width);
    if filled == 0 {
        return GaugeCells {
            solid: 0,
            edge: None,
            empty: width,
        };
    }
    let frame = (now_millis / FRAME_MILLIS) as usize;
    let edge = glyphs
        .get(frame % glyphs.len().max(1))
        .cloned()
        .unwrap_or_else(|| SOLID.to_owned());
    GaugeCells {
        solid: filled - 1,
        edge: Some(edge),
        empty: width - filled,
    }
}

/// Styled spans for a gauge: filled part in `fill`, remainder in `empty`.
pub fn gauge_spans(cells: GaugeCells, fill: Style, empty: Style) -> Vec<Span<'static>> {
    let mut filled = SOLID.repeat(cells.solid);
    if let Some(edge) = cells.edge {
        filled.push_str(&edge);
    }
    vec![
        Span::styled(filled, fill),
        Span::styled(EMPTY.repeat(cells.empty), empty),
    ]
}

/// Scale `rate` against `max(peak, rate * 1.2)` so the current value never
/// pins the bar at 100%. Zero when there is nothing to scale against.
pub fn headroom_percent(rate: f64, peak: f64) -> f64 {
    let scale = peak.max(rate * 1.2);
    if scale > 0.0 {
        clamp_percent(rate / scale * 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn glyphs() -> Vec<String> {
        ["█", "▉", "▊", "▋", "▌", "▍", "▎", "▏"]
            .map(String::from)
            .to_vec()
    }

    fn filled(cells: &GaugeCells) -> usize {
        cells.solid + usize::from(cells.edge.is_some())
    }

    #[test]
    fn percent_is_clamped_before_layout() {
        let filled_counts: Vec<usize> = [-5.0, 0.0, 50.0, 100.0, 150.0]
            .into_iter()
            .map(|pct| filled(&gauge_cells(pct, 100, &glyphs(), 0)))
            .collect();
        assert_eq!(filled_counts, [0, 0, 50, 100, 100]);
    }

    #[test]
    fn fill_rounds_down() {
        let cells = gauge_cells(99.0, 10, &glyphs(), 0);
        assert_eq!(filled(&cells), 9);
        assert_eq!(cells.empty, 1);
    }

    #[test]
    fn edge_glyph_advances_every_200ms() {
        let glyphs = glyphs();
        assert_eq!(gauge_cells(50.0, 10, &glyphs, 0).edge.as_deref(), Some("█"));
        assert_eq!(gauge_cells(50.0, 10, &glyphs, 199).edge.as_deref(), Some("█"));
        assert_eq!(gauge_cells(50.0, 10, &glyphs, 200).edge.as_deref(), Some("▉"));
        assert_eq!(gauge_cells(50.0, 10, &glyphs, 1_400).edge.as_deref(), Some("▏"));
        assert_eq!(gauge_cells(50.0, 10, &glyphs, 1_600).edge.as_deref(), Some("█"));
    }

    #[test]
    fn empty_glyph_set_falls_back_to_solid() {
        let cells = gauge_cells(100.0, 4, &[], 12_345);
        assert_eq!(cells.edge.as_deref(), Some(SOLID));
        assert_eq!(cells.solid, 3);
    }

    #[test]
    fn zero_width_gauge_is_empty() {
        assert_eq!(
            gauge_cells(80.0, 0, &glyphs(), 0),
            GaugeCells {
                solid: 0,
                edge: None,
                empty: 0
            }
        );
    }

    #[test]
    fn spans_cover_the_width() {
        let spans = gauge_spans(gauge_cells(25.0, 8, &glyphs(), 0), Style::default(), Style::default());
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "██░░░░░░");
    }

    #[test]
    fn headroom_keeps_current_rate_below_full() {
        assert!((headroom_percent(100.0, 0.0) - 100.0 / 1.2).abs() < 1e-9);
        assert!((headroom_percent(50.0, 200.0) - 25.0).abs() < 1e-9);
        assert!(headroom_percent(0.0, 0.0).abs() < f64::EPSILON);
    }
}
