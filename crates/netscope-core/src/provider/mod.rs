//! Metric sources behind the [`MetricsProvider`] trait.
//!
//! Providers are called from blocking worker threads by the
//! [`CommandExecutor`](crate::CommandExecutor), never from the reducer.
//! "Nothing to report" is [`ProviderError::Unavailable`]; the executor turns
//! any error into silence rather than a sentinel sample.

mod procfs;
mod scripted;
mod simulated;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::EngineConfig;
use crate::error::ProviderError;
use crate::model::{Connection, DiskUsage, Sample, SystemSnapshot};

pub use procfs::ProcfsProvider;
pub use scripted::ScriptedProvider;
pub use simulated::SimulatedProvider;

/// A pluggable source of telemetry.
pub trait MetricsProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Names of the entities this provider can report on.
    fn discover(&self) -> Result<Vec<String>, ProviderError>;

    /// Current throughput of one entity.
    fn fetch(&self, entity: &str) -> Result<Sample, ProviderError>;

    /// Current socket table.
    fn connections(&self) -> Result<Vec<Connection>, ProviderError> {
        Err(ProviderError::unavailable("connections"))
    }

    /// Current host-level readings.
    fn system(&self) -> Result<SystemSnapshot, ProviderError> {
        Err(ProviderError::unavailable("system snapshot"))
    }

    /// Capacity of the filesystem holding the watched path.
    fn disk(&self) -> Result<DiskUsage, ProviderError> {
        Err(ProviderError::unavailable("disk usage"))
    }
}

/// Which built-in provider to run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    /// Linux `/proc` counters.
    #[default]
    Procfs,
    /// Deterministic synthetic traffic.
    Simulated,
}

/// Construct the built-in provider selected by `config`.
pub fn build_provider(config: &EngineConfig) -> Arc<dyn MetricsProvider> {
    match config.provider {
        ProviderKind::Procfs => {
            Arc::new(ProcfsProvider::new().with_disk_path(config.disk_path.clone()))
        }
        ProviderKind::Simulated => {
            Arc::new(SimulatedProvider::new().with_disk_path(config.disk_path.clone()))
        }
    }
}
