//! Dashboard state: the single value the reducer mutates and views read.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::config::EngineConfig;
use crate::model::{Aggregates, Connection, Entity, SystemSnapshot};

/// Tabs of the dashboard, selectable by number keys 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Speed, // 1
    Interfaces,  // 2
    Connections, // 3
    Graph,       // 4
    System,      // 5
}

impl Tab {
    /// All tabs in tab-bar order.
    pub const ALL: [Tab; 5] = [
        Self::Speed,
        Self::Interfaces,
        Self::Connections,
        Self::Graph,
        Self::System,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based position in the tab bar.
    pub fn index(self) -> usize {
        match self {
            Self::Speed => 0,
            Self::Interfaces => 1,
            Self::Connections => 2,
            Self::Graph => 3,
            Self::System => 4,
        }
    }

    /// Tab at `index`, wrapping around.
    pub fn from_index(index: usize) -> Self {
        Self::ALL
            .get(index % Self::COUNT)
            .copied()
            .unwrap_or_default()
    }

    /// Next tab in tab order (wraps around).
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Numeric key (1-5) for this tab.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Speed => "Live Speed",
            Self::Interfaces => "Interfaces",
            Self::Connections => "Connections",
            Self::Graph => "Graph",
            Self::System => "System",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal size as last reported by a resize event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// A zero dimension means layout cannot run yet.
    pub fn is_ready(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Everything the dashboard knows. Only [`reduce`](crate::reduce) mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub(crate) selected_tab: Tab,
    pub(crate) running: bool,
    pub(crate) viewport: Viewport,
    pub(crate) last_update: Option<DateTime<Utc>>,
    pub(crate) session_started: DateTime<Utc>,
    /// Insertion-ordered registry; iteration order is render order.
    pub(crate) entities: IndexMap<String, Entity>,
    pub(crate) primary: Option<String>,
    pub(crate) connections: Vec<Connection>,
    pub(crate) system: Option<SystemSnapshot>,
    pub(crate) aggregates: Aggregates,
    pub(crate) history_capacity: usize,
}

impl DashboardState {
    /// Fresh state: running, first tab selected, statically configured
    /// entities registered in order.
    pub fn new(config: &EngineConfig, now: DateTime<Utc>) -> Self {
        let mut state = Self {
            selected_tab: Tab::default(),
            running: true,
            viewport: Viewport::default(),
            last_update: None,
            session_started: now,
            entities: IndexMap::new(),
            primary: config.primary.clone(),
            connections: Vec::new(),
            system: None,
            aggregates: Aggregates::default(),
            history_capacity: config.history_capacity,
        };
        for name in &config.entities {
            state.register(name);
        }
        state
    }

    pub fn selected_tab(&self) -> Tab {
        self.selected_tab
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Time carried by the most recent tick.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Start of the current statistics window (startup or last reset).
    pub fn session_started(&self) -> DateTime<Utc> {
        self.session_started
    }

    /// Entities in registration order.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Entity> + Clone {
        self.entities.values()
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The entity featured on the Speed and Graph tabs: the configured
    /// primary if registered, otherwise the first registered entity.
    pub fn primary_entity(&self) -> Option<&Entity> {
        self.primary
            .as_deref()
            .and_then(|name| self.entities.get(name))
            .or_else(|| self.entities.first().map(|(_, entity)| entity))
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn system(&self) -> Option<&SystemSnapshot> {
        self.system.as_ref()
    }

    pub fn aggregates(&self) -> Aggregates {
        self.aggregates
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Add an entity if the name is new. Returns whether it was added.
    pub(crate) fn register(&mut self, name: &str) -> bool {
        if self.entities.contains_key(name) {
            return false;
        }
        self.entities
            .insert(name.to_owned(), Entity::new(name, self.history_capacity));
        true
    }

    /// Clear every history and zero the aggregates in one step.
    pub(crate) fn reset_statistics(&mut self) {
        for entity in self.entities.values_mut() {
            entity.clear_history();
        }
        self.aggregates = Aggregates::default();
        self.session_started = self.last_update.unwrap_or(self.session_started);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(entities: &[&str], primary: Option<&str>) -> EngineConfig {
        EngineConfig {
            entities: entities.iter().map(|s| (*s).to_owned()).collect(),
            primary: primary.map(str::to_owned),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn tabs_wrap() {
        assert_eq!(Tab::from_index(5), Tab::Speed);
        assert_eq!(Tab::from_index(7), Tab::Connections);
        assert_eq!(Tab::System.next(), Tab::Speed);
        for tab in Tab::ALL {
            assert_eq!(Tab::from_index(tab.index()), tab);
        }
    }

    #[test]
    fn static_entities_keep_configured_order() {
        let state = DashboardState::new(&config(&["wlan0", "eth0", "lo"], None), Utc::now());
        let names: Vec<&str> = state.entities().map(Entity::name).collect();
        assert_eq!(names, ["wlan0", "eth0", "lo"]);
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut state = DashboardState::new(&config(&["eth0"], None), Utc::now());
        assert!(!state.register("eth0"));
        assert!(state.register("wlan0"));
        assert_eq!(state.entity_count(), 2);
    }

    #[test]
    fn primary_falls_back_to_first() {
        let state = DashboardState::new(&config(&["eth0", "wlan0"], Some("wlan0")), Utc::now());
        assert_eq!(state.primary_entity().map(Entity::name), Some("wlan0"));

        let state = DashboardState::new(&config(&["eth0", "wlan0"], Some("ghost")), Utc::now());
        assert_eq!(state.primary_entity().map(Entity::name), Some("eth0"));

        let state = DashboardState::new(&config(&[], None), Utc::now());
        assert!(state.primary_entity().is_none());
    }

    #[test]
    fn viewport_readiness() {
        assert!(!Viewport::default().is_ready());
        assert!(!Viewport { width: 0, height: 40 }.is_ready());
        assert!(Viewport { width: 80, height: 24 }.is_ready());
    }
}
