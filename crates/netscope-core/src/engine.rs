//! Runtime around the reducer: the event queue and the command executor.
//!
//! Events are applied strictly one at a time in arrival order. Commands run
//! as background tasks (provider calls on the blocking pool) and report back
//! by enqueueing events, so nothing slow ever happens inside [`reduce`].

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::error::ProviderError;
use crate::event::{Command, Event};
use crate::provider::MetricsProvider;
use crate::reducer::{reduce, startup_commands};
use crate::state::DashboardState;

// ── Command executor ────────────────────────────────────────────────

/// Turns [`Command`]s into background work whose results come back as
/// [`Event`]s on the loop's queue.
pub struct CommandExecutor {
    provider: Arc<dyn MetricsProvider>,
    events: mpsc::UnboundedSender<Event>,
    tick_interval: Duration,
    cancel: CancellationToken,
}

impl CommandExecutor {
    pub fn new(
        provider: Arc<dyn MetricsProvider>,
        events: mpsc::UnboundedSender<Event>,
        tick_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            events,
            tick_interval,
            cancel,
        }
    }

    /// Start `command`. Must be called from within a tokio runtime.
    ///
    /// Returns `Break` for [`Command::Quit`], after cancelling all
    /// outstanding work.
    pub fn execute(&self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Quit => {
                info!("quit requested");
                self.cancel.cancel();
                return ControlFlow::Break(());
            }
            Command::ArmTick => self.arm_tick(),
            Command::Fetch { entity } => {
                let name = entity.clone();
                self.spawn_query(
                    "fetch",
                    move |provider| provider.fetch(&name),
                    move |sample| Event::FetchResult { entity, sample },
                );
            }
            Command::Discover => self.spawn_query(
                "discover",
                |provider| provider.discover(),
                Event::EntitiesDiscovered,
            ),
            Command::RefreshConnections => self.spawn_query(
                "connections",
                |provider| provider.connections(),
                Event::ConnectionsResult,
            ),
            Command::ProbeSystem => {
                self.spawn_query("system", |provider| provider.system(), Event::SystemResult);
            }
        }
        ControlFlow::Continue(())
    }

    fn arm_tick(&self) {
        let events = self.events.clone();
        let cancel = self.cancel.clone();
        let interval = self.tick_interval;
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(interval) => {
                    let _ = events.send(Event::Tick { time: Utc::now() });
                }
            }
        });
    }

    /// Run `query` on the blocking pool and enqueue its result. Errors are
    /// logged and otherwise swallowed: no event means "keep the last value".
    fn spawn_query<T, Q, E>(&self, what: &'static str, query: Q, into_event: E)
    where
        T: Send + 'static,
        Q: FnOnce(&dyn MetricsProvider) -> Result<T, ProviderError> + Send + 'static,
        E: FnOnce(T) -> Event + Send + 'static,
    {
        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            let outcome = tokio::task::spawn_blocking(move || query(provider.as_ref())).await;
            if cancel.is_cancelled() {
                return;
            }
            match outcome {
                Ok(Ok(value)) => {
                    let _ = events.send(into_event(value));
                }
                Ok(Err(e)) if e.is_unavailable() => trace!(what, reason = %e, "nothing to report"),
                Ok(Err(e)) => warn!(what, error = %e, "provider query failed"),
                Err(e) => warn!(what, error = %e, "provider task aborted"),
            }
        });
    }
}

// ── Event loop ──────────────────────────────────────────────────────

/// Owns the dashboard state and its event queue.
///
/// Front ends push input through [`sender`](Self::sender) and either drive
/// the loop themselves with [`next_event`](Self::next_event) +
/// [`apply`](Self::apply) (to interleave rendering) or hand it to
/// [`run`](Self::run).
pub struct EventLoop {
    state: DashboardState,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    executor: CommandExecutor,
    discover: bool,
    cancel: CancellationToken,
}

impl EventLoop {
    pub fn new(config: &EngineConfig, provider: Arc<dyn MetricsProvider>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        debug!(
            provider = provider.name(),
            tick_ms = config.tick_interval.as_millis(),
            history = config.history_capacity,
            "event loop created"
        );
        let executor = CommandExecutor::new(
            provider,
            events_tx.clone(),
            config.tick_interval,
            cancel.clone(),
        );
        Self {
            state: DashboardState::new(config, Utc::now()),
            events_tx,
            events_rx,
            executor,
            discover: config.discover,
            cancel,
        }
    }

    /// Handle for enqueueing events from other tasks.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.events_tx.clone()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Cancelled when the loop quits or is dropped.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Issue the startup commands: discovery, the first tick, and an
    /// initial refresh of every statically configured entity.
    pub fn start(&mut self) -> ControlFlow<()> {
        info!(entities = self.state.entity_count(), "event loop starting");
        for command in startup_commands(&self.state, self.discover) {
            self.executor.execute(command)?;
        }
        ControlFlow::Continue(())
    }

    /// Reduce one event and execute the resulting commands.
    pub fn apply(&mut self, event: Event) -> ControlFlow<()> {
        trace!(?event, "applying event");
        for command in reduce(&mut self.state, event) {
            self.executor.execute(command)?;
        }
        ControlFlow::Continue(())
    }

    /// Wait for the next queued event. `None` once the loop is cancelled.
    pub async fn next_event(&mut self) -> Option<Event> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => None,
            event = self.events_rx.recv() => event,
        }
    }

    /// Start, then apply events until quit, calling `on_state` after each.
    pub async fn run(&mut self, mut on_state: impl FnMut(&DashboardState)) {
        if self.start().is_break() {
            return;
        }
        on_state(&self.state);
        while let Some(event) = self.next_event().await {
            let flow = self.apply(event);
            on_state(&self.state);
            if flow.is_break() {
                break;
            }
        }
        info!("event loop stopped");
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
