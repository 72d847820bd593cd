//! Contracts between the runtime loop and the application.
//!
//! Applications implement [`App`]; the runtime hands them a [`FrameCtx`] once
//! per redraw and never exposes its own internals.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
