//! GPU rendering.
//!
//! Renderers own their GPU resources and build them lazily from the first
//! `RenderCtx` they see. Every buffer slot and attribute location comes from
//! `prism_layout`; nothing here hard-codes a binding number.

mod ctx;
mod depth;
mod error;
mod triangle;
mod uniform_ring;
mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use depth::{DepthTarget, DEPTH_FORMAT};
pub use error::RendererError;
pub use triangle::{TriangleConfig, TriangleRenderer, TRIANGLE_COLORS, TRIANGLE_INDICES, TRIANGLE_POSITIONS};
pub use uniform_ring::{UniformRing, MAX_BUFFERS_IN_FLIGHT};
pub use vertex::{AttributeDesc, BufferLayoutDesc, VertexDescriptor};
