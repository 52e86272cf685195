//! The reducer: one event in, mutated state and follow-up commands out.
//!
//! `reduce` is the only writer of [`DashboardState`]. It is synchronous and
//! does no IO; anything slow is expressed as a [`Command`] and comes back
//! later as another [`Event`].

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::event::{Command, Event, Key};
use crate::model::Sample;
use crate::state::{DashboardState, Tab, Viewport};

/// Apply `event` to `state` and return the commands it triggers.
pub fn reduce(state: &mut DashboardState, event: Event) -> Vec<Command> {
    match event {
        Event::Resize { width, height } => {
            state.viewport = Viewport { width, height };
            Vec::new()
        }
        Event::KeyPress(key) => on_key(state, key),
        Event::Tick { time } => on_tick(state, time),
        Event::FetchResult { entity, sample } => {
            on_fetch_result(state, &entity, sample);
            Vec::new()
        }
        Event::EntitiesDiscovered(names) => {
            for name in &names {
                if state.register(name) {
                    debug!(entity = %name, "registered discovered entity");
                }
            }
            Vec::new()
        }
        Event::ConnectionsResult(connections) => {
            if state.running {
                state.connections = connections;
            } else {
                debug!("dropping connections snapshot while paused");
            }
            Vec::new()
        }
        Event::SystemResult(snapshot) => {
            if state.running {
                state.system = Some(snapshot);
            } else {
                debug!("dropping system snapshot while paused");
            }
            Vec::new()
        }
    }
}

/// Commands to issue once before the first event: optional discovery, the
/// first tick, and an initial round of refreshes.
pub fn startup_commands(state: &DashboardState, discover: bool) -> Vec<Command> {
    let mut commands = Vec::new();
    if discover {
        commands.push(Command::Discover);
    }
    commands.push(Command::ArmTick);
    commands.extend(refresh_commands(state));
    commands
}

fn on_key(state: &mut DashboardState, key: Key) -> Vec<Command> {
    match key {
        Key::Quit => return vec![Command::Quit],
        Key::CycleTab => state.selected_tab = state.selected_tab.next(),
        Key::SelectTab(index) => state.selected_tab = Tab::from_index(index),
        Key::Reset => {
            state.reset_statistics();
            info!("statistics reset");
        }
        Key::ToggleRun => {
            state.running = !state.running;
            info!(running = state.running, "toggled run state");
        }
        Key::Unbound => {}
    }
    Vec::new()
}

fn on_tick(state: &mut DashboardState, time: DateTime<Utc>) -> Vec<Command> {
    state.last_update = Some(time);
    let mut commands = vec![Command::ArmTick];
    if state.running {
        commands.extend(refresh_commands(state));
    }
    commands
}

/// One fetch per registered entity, in registry order, plus the snapshot
/// refreshes.
fn refresh_commands(state: &DashboardState) -> impl Iterator<Item = Command> + '_ {
    state
        .entities
        .keys()
        .map(|name| Command::Fetch {
            entity: name.clone(),
        })
        .chain([Command::RefreshConnections, Command::ProbeSystem])
}

fn on_fetch_result(state: &mut DashboardState, name: &str, sample: Sample) {
    if !state.running {
        debug!(entity = name, "dropping fetch result while paused");
        return;
    }
    let Some(entity) = state.entities.get_mut(name) else {
        warn!(entity = name, "rejecting fetch result for unknown entity");
        return;
    };
    let stored = entity.record(sample);
    state.aggregates.observe(&stored);
}
