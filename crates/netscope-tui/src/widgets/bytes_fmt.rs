//! Human-readable byte, rate and duration formatting helpers.

use std::time::Duration;

const UNIT_PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];
const MEBIBIT: f64 = 1024.0 * 1024.0;

/// Format a byte count in binary units: "512 B", "1.5 KB", "3.2 MB".
///
/// Negative and non-finite input reads as zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn fmt_bytes(bytes: f64) -> String {
    let bytes = if bytes.is_finite() && bytes > 0.0 {
        bytes
    } else {
        0.0
    };
    if bytes < 1024.0 {
        return format!("{} B", bytes.floor() as u64);
    }
    let mut value = bytes / 1024.0;
    let mut prefix = 0;
    while value >= 1024.0 && prefix + 1 < UNIT_PREFIXES.len() {
        value /= 1024.0;
        prefix += 1;
    }
    format!("{value:.1} {}B", UNIT_PREFIXES[prefix])
}

/// [`fmt_bytes`] for counters.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn fmt_byte_count(bytes: u64) -> String {
    fmt_bytes(bytes as f64)
}

/// Format a rate in bytes/sec as "1.5 MB/s".
pub fn fmt_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", fmt_bytes(bytes_per_sec))
}

/// Format a rate in bytes/sec as megabits: "12.50 Mbps".
pub fn fmt_mbps(bytes_per_sec: f64) -> String {
    format!("{:.2} Mbps", bytes_per_sec.max(0.0) * 8.0 / MEBIBIT)
}

/// Whole-second duration: "1h 2m 3s".
pub fn fmt_duration(duration: Duration) -> String {
    humantime::format_duration(Duration::from_secs(duration.as_secs())).to_string()
}
