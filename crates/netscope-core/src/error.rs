// ── Provider error types ──
//
// Every provider failure is non-fatal: the executor logs it and simply
// never enqueues a result event, so the entity keeps its last known rates.

use std::path::PathBuf;

use thiserror::Error;

/// Why a [`MetricsProvider`](crate::MetricsProvider) produced nothing.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no data available for {what}")]
    Unavailable { what: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

impl ProviderError {
    pub fn unavailable(what: impl Into<String>) -> Self {
        Self::Unavailable { what: what.into() }
    }

    /// `Unavailable` is the normal "nothing to report" outcome, not a fault.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
