//! Keyboard input.
//!
//! Public types are platform-agnostic; `translate` maps winit events into them
//! and is only used by the runtime.

mod frame;
mod state;
pub(crate) mod translate;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers};
