//! Threshold-scan throughput graph.
//!
//! Rows are value thresholds, columns are time buckets over the history.
//! A cell is marked when the bucket's sample reaches the row's threshold;
//! download wins over upload when both do.

use netscope_core::{HistoryBuffer, Sample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphCell {
    Download,
    Upload,
    Empty,
}

/// One graph row with the threshold it was scanned at.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRow {
    pub threshold: f64,
    pub cells: Vec<GraphCell>,
}

/// Scan `history` into `height` rows of `width` cells, top row first.
///
/// Column `c` samples history index `floor(c * len / width)`; row `r`
/// (counted from the bottom) has threshold `max * r / (height - 1)` where
/// `max` is the largest download or upload rate in the history, or 1 when
/// everything is zero. Heights below 2 are treated as 2. An empty history
/// or zero width yields rows without cells.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn threshold_scan(history: &HistoryBuffer<Sample>, width: usize, height: usize) -> Vec<GraphRow> {
    let height = height.max(2);
    let len = history.len();
    let max = history
        .values()
        .map(Sample::peak)
        .fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    let columns: Vec<&Sample> = if len == 0 {
        Vec::new()
    } else {
        (0..width)
            .filter_map(|c| history.get((c * len / width).min(len - 1)))
            .collect()
    };

    (0..height)
        .rev()
        .map(|r| {
            let threshold = max * r as f64 / (height - 1) as f64;
            let cells = columns
                .iter()
                .map(|sample| {
                    if sample.download() >= threshold {
                        GraphCell::Download
                    } else if sample.upload() >= threshold {
                        GraphCell::Upload
                    } else {
                        GraphCell::Empty
                    }
                })
                .collect();
            GraphRow { threshold, cells }
        })
        .collect()
}
