//! Inputs to the reducer and the work it asks for in return.

use chrono::{DateTime, Utc};

use crate::model::{Connection, Sample, SystemSnapshot};

/// Logical keyboard commands. Terminal key codes are mapped onto these by
/// the front end; anything it does not recognise arrives as [`Key::Unbound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Quit,
    CycleTab,
    /// Zero-based tab index; wrapped modulo the tab count.
    SelectTab(usize),
    Reset,
    ToggleRun,
    Unbound,
}

/// Everything that can happen to the dashboard, applied one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Terminal size in character cells. Width 0 means "not measured yet".
    Resize { width: u16, height: u16 },
    KeyPress(Key),
    Tick { time: DateTime<Utc> },
    /// Completion of a [`Command::Fetch`].
    FetchResult { entity: String, sample: Sample },
    /// Completion of a [`Command::Discover`].
    EntitiesDiscovered(Vec<String>),
    /// Completion of a [`Command::RefreshConnections`].
    ConnectionsResult(Vec<Connection>),
    /// Completion of a [`Command::ProbeSystem`].
    SystemResult(SystemSnapshot),
}

/// Follow-up work produced by the reducer, executed outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Schedule the next [`Event::Tick`].
    ArmTick,
    Fetch { entity: String },
    Discover,
    RefreshConnections,
    ProbeSystem,
    /// Stop the loop. Outstanding work is abandoned.
    Quit,
}
