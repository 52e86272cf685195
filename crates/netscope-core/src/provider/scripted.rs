use std::collections::VecDeque;

use dashmap::DashMap;

use super::MetricsProvider;
use crate::error::ProviderError;
use crate::model::{Connection, DiskUsage, Sample, SystemSnapshot};

/// Replays pre-recorded samples, one per fetch, per entity.
///
/// An exhausted (or unknown) entity is `Unavailable`, which lets tests model
/// a source that stops reporting.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    names: Vec<String>,
    scripts: DashMap<String, VecDeque<Sample>>,
    connections: Option<Vec<Connection>>,
    system: Option<SystemSnapshot>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `samples` for `entity`, appending to anything already queued.
    pub fn with_samples(
        mut self,
        entity: impl Into<String>,
        samples: impl IntoIterator<Item = Sample>,
    ) -> Self {
        let entity = entity.into();
        if !self.names.contains(&entity) {
            self.names.push(entity.clone());
        }
        self.scripts.entry(entity).or_default().extend(samples);
        self
    }

    pub fn with_connections(mut self, connections: Vec<Connection>) -> Self {
        self.connections = Some(connections);
        self
    }

    pub fn with_system(mut self, snapshot: SystemSnapshot) -> Self {
        self.system = Some(snapshot);
        self
    }

    /// Samples still queued for `entity`.
    pub fn remaining(&self, entity: &str) -> usize {
        self.scripts.get(entity).map_or(0, |queue| queue.len())
    }
}

impl MetricsProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn discover(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.names.clone())
    }

    fn fetch(&self, entity: &str) -> Result<Sample, ProviderError> {
        self.scripts
            .get_mut(entity)
            .and_then(|mut queue| queue.pop_front())
            .ok_or_else(|| ProviderError::unavailable(format!("scripted samples for {entity}")))
    }

    fn connections(&self) -> Result<Vec<Connection>, ProviderError> {
        self.connections
            .clone()
            .ok_or_else(|| ProviderError::unavailable("scripted connections"))
    }

    fn system(&self) -> Result<SystemSnapshot, ProviderError> {
        self.system
            .clone()
            .ok_or_else(|| ProviderError::unavailable("scripted system snapshot"))
    }

    fn disk(&self) -> Result<DiskUsage, ProviderError> {
        self.system
            .as_ref()
            .and_then(|system| system.disk.clone())
            .ok_or_else(|| ProviderError::unavailable("scripted disk usage"))
    }
}
