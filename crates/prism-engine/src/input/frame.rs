use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Per-frame input deltas.
///
/// `InputState` holds what is down right now; `InputFrame` holds what changed
/// since the last presented frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went down this frame (repeats excluded).
    pub keys_pressed: HashSet<Key>,

    /// Keys that went up this frame.
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// True if `key` went down this frame with only the command modifier held.
    pub fn command_shortcut(&self, key: Key) -> bool {
        self.events.iter().any(|ev| {
            matches!(
                ev,
                InputEvent::Key { key: k, state: KeyState::Pressed, modifiers: m, repeat: false }
                    if *k == key && m.command_only()
            )
        })
    }
}
