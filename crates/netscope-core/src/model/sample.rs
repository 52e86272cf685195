use chrono::{DateTime, Utc};

/// One timestamped throughput observation. Rates are bytes per second.
///
/// Samples are immutable once built; [`Sample::new`] is the only way to make
/// one and it guarantees both rates are finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    download: f64,
    upload: f64,
    at: DateTime<Utc>,
}

impl Sample {
    /// Build a sample. Negative and non-finite rates are recorded as `0.0`.
    pub fn new(download: f64, upload: f64, at: DateTime<Utc>) -> Self {
        Self {
            download: sanitize_rate(download),
            upload: sanitize_rate(upload),
            at,
        }
    }

    /// Download rate in bytes per second.
    pub fn download(&self) -> f64 {
        self.download
    }

    /// Upload rate in bytes per second.
    pub fn upload(&self) -> f64 {
        self.upload
    }

    /// When the observation was taken.
    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// The larger of the two rates.
    pub fn peak(&self) -> f64 {
        self.download.max(self.upload)
    }

    /// Same rates, different timestamp.
    pub(crate) fn restamped(self, at: DateTime<Utc>) -> Self {
        Self { at, ..self }
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        0.0
    }
}
