//! Configuration for the netscope dashboard.
//!
//! Layered with figment: built-in defaults, then the TOML file, then
//! `NETSCOPE_`-prefixed environment variables (`__` separates sections, e.g.
//! `NETSCOPE_ENGINE__TICK_INTERVAL_MS=250`). Command-line overrides are
//! applied by the binary on the returned [`Config`] before [`Config::validate`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netscope_core::config::{DEFAULT_HISTORY_CAPACITY, DEFAULT_TICK_INTERVAL};
use netscope_core::{EngineConfig, ProviderKind, SeverityBands};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSection,

    #[serde(default)]
    pub display: DisplaySection,
}

/// `[engine]`: sampling and data-source settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSection {
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,

    /// Samples kept per entity.
    pub history_capacity: usize,

    pub provider: ProviderKind,

    /// Ask the provider for entity names at startup.
    pub discover: bool,

    /// Entities to show even before discovery, in this order.
    pub entities: Vec<String>,

    /// Entity featured on the Speed and Graph tabs.
    pub primary: Option<String>,

    /// Path whose filesystem is shown on the System tab.
    pub disk_path: PathBuf,
}

impl Default for EngineSection {
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            provider: ProviderKind::default(),
            discover: true,
            entities: Vec::new(),
            primary: None,
            disk_path: PathBuf::from("/"),
        }
    }
}

/// `[display]`: presentation settings read by the TUI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Rows of the throughput graph, including the top row.
    pub graph_height: u16,

    /// Nominal link speed; enables the utilisation gauge on the Speed tab.
    pub link_capacity_mbps: Option<f64>,

    pub color: bool,

    /// Frames of the gauge's leading-edge animation.
    pub glyphs: Vec<String>,

    /// Thresholds for memory, disk and link utilisation colouring. Kept last so
    /// it serializes as a trailing `[display.bands]` table.
    pub bands: SeverityBands,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            graph_height: 10,
            link_capacity_mbps: None,
            color: true,
            glyphs: ["█", "▉", "▊", "▋", "▌", "▍", "▎", "▏"]
                .map(String::from)
                .to_vec(),
            bands: SeverityBands::default(),
        }
    }
}

impl Config {
    /// Reject values the engine or renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.tick_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "engine.tick_interval_ms",
                "must be greater than zero",
            ));
        }
        if self.engine.history_capacity == 0 {
            return Err(ConfigError::invalid(
                "engine.history_capacity",
                "must be greater than zero",
            ));
        }
        if !self.engine.disk_path.is_absolute() {
            return Err(ConfigError::invalid(
                "engine.disk_path",
                format!("must be absolute, got {}", self.engine.disk_path.display()),
            ));
        }
        if self.display.graph_height < 2 {
            return Err(ConfigError::invalid(
                "display.graph_height",
                format!("must be at least 2, got {}", self.display.graph_height),
            ));
        }
        let SeverityBands { warning, critical } = self.display.bands;
        if !(0.0 < warning && warning < critical && critical <= 100.0) {
            return Err(ConfigError::invalid(
                "display.bands",
                format!("expected 0 < warning < critical <= 100, got {warning} / {critical}"),
            ));
        }
        if let Some(capacity) = self.display.link_capacity_mbps {
            if !(capacity.is_finite() && capacity > 0.0) {
                return Err(ConfigError::invalid(
                    "display.link_capacity_mbps",
                    format!("must be a positive number, got {capacity}"),
                ));
            }
        }
        if self.display.glyphs.is_empty() || self.display.glyphs.iter().any(String::is_empty) {
            return Err(ConfigError::invalid(
                "display.glyphs",
                "needs at least one non-empty glyph",
            ));
        }
        Ok(())
    }

    /// Engine settings for [`netscope_core::EventLoop`].
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            tick_interval: Duration::from_millis(self.engine.tick_interval_ms),
            history_capacity: self.engine.history_capacity,
            provider: self.engine.provider,
            discover: self.engine.discover,
            entities: self.engine.entities.clone(),
            primary: self.engine.primary.clone(),
            disk_path: self.engine.disk_path.clone(),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("rs", "netscope", "netscope").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netscope");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the default path + environment. A missing file is not an error.
pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&config_path())
}

/// Load from `path` + environment. A missing file is not an error.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETSCOPE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize `cfg` to TOML at `path`, creating parent directories.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, cfg.to_toml()?)?;
    Ok(())
}
