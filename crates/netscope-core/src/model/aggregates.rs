use super::Sample;

/// Session-wide running statistics across every entity.
///
/// Only the reducer folds samples in, and only while the dashboard is
/// running; `reset` zeroes everything at once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    max_download: f64,
    max_upload: f64,
    total_download: u64,
    total_upload: u64,
}

impl Aggregates {
    /// Highest download rate seen this session, bytes/sec.
    pub fn max_download(&self) -> f64 {
        self.max_download
    }

    /// Highest upload rate seen this session, bytes/sec.
    pub fn max_upload(&self) -> f64 {
        self.max_upload
    }

    /// Approximate bytes downloaded this session. See [`half_interval_bytes`].
    pub fn total_download(&self) -> u64 {
        self.total_download
    }

    /// Approximate bytes uploaded this session. See [`half_interval_bytes`].
    pub fn total_upload(&self) -> u64 {
        self.total_upload
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn observe(&mut self, sample: &Sample) {
        self.max_download = self.max_download.max(sample.download());
        self.max_upload = self.max_upload.max(sample.upload());
        self.total_download = self
            .total_download
            .saturating_add(half_interval_bytes(sample.download()));
        self.total_upload = self
            .total_upload
            .saturating_add(half_interval_bytes(sample.upload()));
    }
}

/// Bytes credited to a session total for one accepted sample: `floor(rate / 2)`.
///
/// This is a heuristic, not a bandwidth integral. It treats every sample as
/// covering half a second of traffic regardless of the real tick interval or
/// the spacing between fetch results, so totals drift whenever the interval
/// is not 500 ms or fetches are lost.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn half_interval_bytes(rate: f64) -> u64 {
    // Float-to-int `as` saturates; rates are already non-negative.
    (rate / 2.0).floor() as u64
}
