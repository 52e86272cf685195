//! Engine configuration, built by `netscope-config` or directly in tests.

use std::path::PathBuf;
use std::time::Duration;

use crate::provider::ProviderKind;

/// Default interval between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Default number of samples kept per entity (30 s at the default tick).
pub const DEFAULT_HISTORY_CAPACITY: usize = 60;

/// Everything the event loop needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub tick_interval: Duration,
    pub history_capacity: usize,
    pub provider: ProviderKind,
    /// Ask the provider for entity names at startup.
    pub discover: bool,
    /// Entities registered before any data arrives, in display order.
    pub entities: Vec<String>,
    /// Entity shown on the Speed and Graph tabs. Falls back to the first
    /// registered entity when unset or unknown.
    pub primary: Option<String>,
    /// Path whose filesystem is reported on the System tab.
    pub disk_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            provider: ProviderKind::default(),
            discover: true,
            entities: Vec::new(),
            primary: None,
            disk_path: PathBuf::from("/"),
        }
    }
}
