use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current keyboard state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event to the current state and records deltas in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.modifiers = Modifiers::NONE;
                }
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }
        }

        frame.events.push(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, modifiers: Modifiers, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, modifiers, repeat }
    }

    #[test]
    fn press_then_release_records_both_transitions() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed, Modifiers::NONE, false));
        assert!(state.keys_down.contains(&Key::A));
        assert!(frame.keys_pressed.contains(&Key::A));

        state.apply_event(&mut frame, key(Key::A, KeyState::Released, Modifiers::NONE, false));
        assert!(!state.keys_down.contains(&Key::A));
        assert!(frame.keys_released.contains(&Key::A));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn repeat_press_is_not_a_new_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Q, KeyState::Pressed, Modifiers::NONE, false));
        frame.clear();
        state.apply_event(&mut frame, key(Key::Q, KeyState::Pressed, Modifiers::NONE, true));

        assert!(!frame.keys_pressed.contains(&Key::Q));
        assert!(state.keys_down.contains(&Key::Q));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, key(Key::W, KeyState::Pressed, Modifiers::command(), false));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.focused);
        assert!(state.keys_down.is_empty());
        assert_eq!(state.modifiers, Modifiers::NONE);
    }

    #[test]
    fn command_shortcut_requires_exact_modifiers() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let mut with_shift = Modifiers::command();
        with_shift.shift = true;
        state.apply_event(&mut frame, key(Key::Q, KeyState::Pressed, with_shift, false));
        assert!(!frame.command_shortcut(Key::Q));

        frame.clear();
        state.keys_down.clear();
        state.apply_event(&mut frame, key(Key::Q, KeyState::Pressed, Modifiers::command(), false));
        assert!(frame.command_shortcut(Key::Q));
    }

    #[test]
    fn repeated_command_q_is_not_a_shortcut() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Q, KeyState::Pressed, Modifiers::command(), true));
        assert!(!frame.command_shortcut(Key::Q));
    }
}
