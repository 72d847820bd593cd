//! Prism engine crate.
//!
//! Platform and GPU runtime for the Prism triangle demo. Binding slots and
//! the uniform layout come from `prism-layout`; this crate only consumes them.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;

pub use prism_layout as layout;
