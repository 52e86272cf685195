//! Terminal key codes → logical [`Key`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use netscope_core::{Key, Tab};

/// Map a key press. Anything unrecognised is [`Key::Unbound`], which the
/// reducer ignores.
pub fn map_key(key: KeyEvent) -> Key {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c'))
        | (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('q' | 'Q')) => Key::Quit,
        (KeyModifiers::NONE, KeyCode::Tab) => Key::CycleTab,
        (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => c
            .to_digit(10)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n <= Tab::COUNT)
            .map_or(Key::Unbound, |n| Key::SelectTab(n - 1)),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('r' | 'R')) => Key::Reset,
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('s' | 'S')) => Key::ToggleRun,
        _ => Key::Unbound,
    }
}
