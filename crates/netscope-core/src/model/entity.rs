use chrono::{DateTime, Utc};

use super::Sample;
use crate::history::HistoryBuffer;

/// A named metrics source, typically a network interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    download: f64,
    upload: f64,
    last_seen: Option<DateTime<Utc>>,
    history: HistoryBuffer<Sample>,
}

impl Entity {
    pub fn new(name: impl Into<String>, history_capacity: usize) -> Self {
        Self {
            name: name.into(),
            download: 0.0,
            upload: 0.0,
            last_seen: None,
            history: HistoryBuffer::new(history_capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last known download rate, bytes/sec.
    pub fn download_rate(&self) -> f64 {
        self.download
    }

    /// Last known upload rate, bytes/sec.
    pub fn upload_rate(&self) -> f64 {
        self.upload
    }

    /// Timestamp of the most recent accepted sample, if any ever arrived.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_seen
    }

    /// Whether the provider has ever reported data for this entity.
    pub fn is_observed(&self) -> bool {
        self.last_seen.is_some()
    }

    pub fn history(&self) -> &HistoryBuffer<Sample> {
        &self.history
    }

    /// Store an accepted sample and make its rates current.
    ///
    /// A sample older than the newest one held is re-stamped to that newest
    /// timestamp, keeping history timestamps non-decreasing when fetches
    /// complete out of order. Returns the sample as stored.
    pub(crate) fn record(&mut self, sample: Sample) -> Sample {
        let sample = match self.history.latest() {
            Some(newest) if newest.at() > sample.at() => sample.restamped(newest.at()),
            _ => sample,
        };
        self.download = sample.download();
        self.upload = sample.upload();
        self.last_seen = Some(sample.at());
        self.history.push(sample);
        sample
    }

    pub(crate) fn clear_history(&mut self) {
        self.history.clear();
    }
}
