#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;

use netscope_core::{EngineConfig, Event, EventLoop, Key, ProviderKind, SimulatedProvider};

#[tokio::test(start_paused = true)]
async fn simulated_session_discovers_and_samples_until_quit() {
    let config = EngineConfig {
        provider: ProviderKind::Simulated,
        ..EngineConfig::default()
    };
    let mut event_loop = EventLoop::new(&config, Arc::new(SimulatedProvider::new()));
    let sender = event_loop.sender();
    let token = event_loop.cancel_token();

    let mut quit_sent = false;
    event_loop
        .run(|state| {
            let sampled = state
                .entities()
                .filter(|entity| entity.history().len() >= 3)
                .count();
            if !quit_sent && state.entity_count() > 0 && sampled == state.entity_count() {
                sender.send(Event::KeyPress(Key::Quit)).unwrap();
                quit_sent = true;
            }
        })
        .await;

    assert!(quit_sent);
    assert!(token.is_cancelled());

    let state = event_loop.state();
    let names: Vec<&str> = state.entities().map(|e| e.name()).collect();
    assert_eq!(names, ["eth0", "wlan0", "lo", "docker0"]);
    assert!(state.aggregates().max_download() > 0.0);
    assert!(!state.connections().is_empty());
    assert!(state.system().is_some());
}
