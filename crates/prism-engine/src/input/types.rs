use std::fmt;

/// Keyboard key identifier (physical position, US layout names).
///
/// Only keys the runtime has a use for are named; everything else maps to
/// `Key::Unknown` carrying the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    // Modifiers as keys
    Shift,
    Control,
    Alt,
    Meta,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "Unknown({code:#x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS, Super/Windows elsewhere.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// The platform's shortcut modifier alone (Cmd on macOS, Ctrl elsewhere).
    pub const fn command() -> Self {
        if cfg!(target_os = "macos") {
            Self { meta: true, ..Self::NONE }
        } else {
            Self { ctrl: true, ..Self::NONE }
        }
    }

    /// True when the shortcut modifier is held and nothing else is.
    pub fn command_only(&self) -> bool {
        *self == Self::command()
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// True for auto-repeat.
        repeat: bool,
    },

    /// Window focus change.
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_only_rejects_extra_modifiers() {
        let mut m = Modifiers::command();
        assert!(m.command_only());
        m.shift = true;
        assert!(!m.command_only());
        assert!(!Modifiers::NONE.command_only());
    }

    #[test]
    fn unknown_key_displays_code() {
        assert_eq!(Key::Unknown(0x2a).to_string(), "Unknown(0x2a)");
        assert_eq!(Key::Q.to_string(), "Q");
    }
}
