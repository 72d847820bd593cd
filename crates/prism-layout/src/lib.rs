//! Layout contract shared between the Prism host and its shaders.
//!
//! Host code uses these definitions to decide which slot a buffer or vertex
//! attribute is bound to; shader code reads from the same slots. WGSL cannot
//! import Rust items, so the [`wgsl`] module renders the very same table into
//! shader source.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`index`] | `BufferIndex`, `VertexAttribute`, flat `u32` constants |
//! | [`uniforms`] | `Uniforms`, `Mat4`, uniform slot sizing |
//! | [`wgsl`] | WGSL prelude + `${NAME}` placeholder expansion |
//! | [`error`] | `TemplateError`, `UnknownIndex` |
//!
//! # Quick start
//!
//! ```rust
//! use prism_layout::{wgsl, BufferIndex, Uniforms, BUFFER_INDEX_UNIFORMS};
//!
//! assert_eq!(BufferIndex::Uniforms.index(), BUFFER_INDEX_UNIFORMS);
//! assert_eq!(std::mem::size_of::<Uniforms>(), 64);
//!
//! let src = wgsl::expand("@binding(${BUFFER_INDEX_UNIFORMS})").unwrap();
//! assert_eq!(src, "@binding(2)");
//! ```

pub mod error;
pub mod index;
pub mod uniforms;
pub mod wgsl;

pub use error::{TemplateError, TemplateErrorKind, UnknownIndex};
pub use index::{
    BufferIndex, VertexAttribute, BUFFER_INDEX_MESH_COLORS, BUFFER_INDEX_MESH_POSITIONS,
    BUFFER_INDEX_UNIFORMS, VERTEX_ATTRIBUTE_COLOR, VERTEX_ATTRIBUTE_POSITION,
};
pub use uniforms::{aligned_uniforms_size, Mat4, Uniforms, ALIGNED_UNIFORMS_SIZE};
