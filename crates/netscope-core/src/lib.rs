//! Tick-driven telemetry engine behind the `netscope` terminal dashboard.
//!
//! The crate owns everything that is not presentation:
//!
//! - **[`DashboardState`]** — the single source of truth: entity registry
//!   (insertion-ordered, so every view renders in the same order), session
//!   aggregates, selected [`Tab`], run/pause flag and last-update clock.
//!
//! - **[`reduce`]** — applies one [`Event`] to the state and returns the
//!   follow-up [`Command`]s. It never blocks and never performs IO.
//!
//! - **[`EventLoop`]** — owns the state and the event queue, feeds events
//!   through [`reduce`] one at a time and hands commands to the
//!   [`CommandExecutor`], which runs slow work (timers, provider reads) off
//!   the loop and re-enters results as new events.
//!
//! - **[`MetricsProvider`]** — the pluggable source of samples, connections
//!   and system snapshots (memory, load, disk usage). [`ProcfsProvider`] reads Linux `/proc`,
//!   [`SimulatedProvider`] synthesizes deterministic traffic and
//!   [`ScriptedProvider`] replays canned samples for tests.
//!
//! - **[`HistoryBuffer`]** — bounded FIFO of samples kept per entity.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod history;
pub mod model;
pub mod provider;
pub mod reducer;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::EngineConfig;
pub use engine::{CommandExecutor, EventLoop};
pub use error::ProviderError;
pub use event::{Command, Event, Key};
pub use history::HistoryBuffer;
pub use provider::{
    MetricsProvider, ProcfsProvider, ProviderKind, ScriptedProvider, SimulatedProvider,
    build_provider,
};
pub use reducer::{reduce, startup_commands};
pub use state::{DashboardState, Tab, Viewport};

pub use model::{
    Aggregates, Connection, DiskUsage, Entity, Protocol, Sample, Severity, SeverityBands,
    SystemSnapshot, TcpState, clamp_percent,
};
