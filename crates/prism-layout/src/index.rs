//! Binding slot numbering.
//!
//! Each family is declared once in a table below. The table emits:
//! - a `#[repr(u32)]` enum (host code, pattern matching, iteration)
//! - one flat `u32` constant per member (const contexts, WGSL placeholders)
//!
//! Families are indexed independently: `BufferIndex::MeshPositions` and
//! `VertexAttribute::Position` are both `0`. Duplicate values within one family
//! are rejected by the compiler (enum discriminants must be unique).

use crate::error::UnknownIndex;

macro_rules! binding_family {
    (
        $(#[$meta:meta])*
        pub enum $family:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $konst:ident,
            )+
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum $family {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        $(
            #[doc = concat!("Flat form of [`", stringify!($family), "::", stringify!($variant), "`].")]
            pub const $konst: u32 = $family::$variant as u32;
        )+

        impl $family {
            /// Every member, in ascending index order.
            pub const ALL: &'static [$family] = &[$($family::$variant,)+];

            /// Numeric slot shared with shader code.
            #[inline]
            pub const fn index(self) -> u32 {
                self as u32
            }

            /// Slot as a `usize`, for indexing host-side tables.
            #[inline]
            pub const fn slot(self) -> usize {
                self as usize
            }

            /// Name of the flat constant (also the WGSL constant / placeholder name).
            pub const fn const_name(self) -> &'static str {
                match self {
                    $($family::$variant => stringify!($konst),)+
                }
            }
        }

        impl From<$family> for u32 {
            #[inline]
            fn from(v: $family) -> u32 {
                v.index()
            }
        }

        impl TryFrom<u32> for $family {
            type Error = UnknownIndex;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($family::$variant),)+
                    _ => Err(UnknownIndex { family: stringify!($family), value }),
                }
            }
        }
    };
}

binding_family! {
    /// Buffer binding slots.
    ///
    /// Mesh slots are vertex buffer slots; `Uniforms` is the binding number of
    /// the uniform buffer inside bind group 0.
    pub enum BufferIndex {
        MeshPositions = 0 => BUFFER_INDEX_MESH_POSITIONS,
        MeshColors = 1 => BUFFER_INDEX_MESH_COLORS,
        Uniforms = 2 => BUFFER_INDEX_UNIFORMS,
    }
}

binding_family! {
    /// Vertex attribute locations (`@location(n)` in WGSL).
    pub enum VertexAttribute {
        Position = 0 => VERTEX_ATTRIBUTE_POSITION,
        Color = 1 => VERTEX_ATTRIBUTE_COLOR,
    }
}

impl BufferIndex {
    /// Buffers that feed vertex attributes (as opposed to uniform data).
    pub const MESH: [BufferIndex; 2] = [BufferIndex::MeshPositions, BufferIndex::MeshColors];

    #[inline]
    pub const fn is_mesh(self) -> bool {
        matches!(self, BufferIndex::MeshPositions | BufferIndex::MeshColors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ── buffer indices ────────────────────────────────────────────────────

    #[test]
    fn buffer_indices_have_fixed_values() {
        assert_eq!(BufferIndex::MeshPositions.index(), 0);
        assert_eq!(BufferIndex::MeshColors.index(), 1);
        assert_eq!(BufferIndex::Uniforms.index(), 2);
    }

    #[test]
    fn buffer_indices_are_distinct() {
        let set: HashSet<u32> = BufferIndex::ALL.iter().map(|b| b.index()).collect();
        assert_eq!(set.len(), BufferIndex::ALL.len());
        assert_eq!(BufferIndex::ALL.len(), 3);
    }

    #[test]
    fn mesh_buffers_exclude_uniforms() {
        assert!(BufferIndex::MESH.iter().all(|b| b.is_mesh()));
        assert!(!BufferIndex::Uniforms.is_mesh());
    }

    // ── vertex attributes ─────────────────────────────────────────────────

    #[test]
    fn vertex_attributes_have_fixed_values() {
        assert_eq!(VertexAttribute::Position.index(), 0);
        assert_eq!(VertexAttribute::Color.index(), 1);
    }

    #[test]
    fn vertex_attributes_are_distinct() {
        let set: HashSet<u32> = VertexAttribute::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(set.len(), 2);
    }

    // ── enum vs flat constants ────────────────────────────────────────────

    #[test]
    fn flat_constants_match_enums() {
        assert_eq!(BUFFER_INDEX_MESH_POSITIONS, BufferIndex::MeshPositions.index());
        assert_eq!(BUFFER_INDEX_MESH_COLORS, BufferIndex::MeshColors.index());
        assert_eq!(BUFFER_INDEX_UNIFORMS, BufferIndex::Uniforms.index());
        assert_eq!(BUFFER_INDEX_UNIFORMS, 2);
        assert_eq!(VERTEX_ATTRIBUTE_POSITION, VertexAttribute::Position.index());
        assert_eq!(VERTEX_ATTRIBUTE_COLOR, VertexAttribute::Color.index());
    }

    #[test]
    fn const_names_follow_flat_constants() {
        assert_eq!(BufferIndex::Uniforms.const_name(), "BUFFER_INDEX_UNIFORMS");
        assert_eq!(VertexAttribute::Color.const_name(), "VERTEX_ATTRIBUTE_COLOR");
    }

    // ── conversions ───────────────────────────────────────────────────────

    #[test]
    fn try_from_round_trips_every_member() {
        for &b in BufferIndex::ALL {
            assert_eq!(BufferIndex::try_from(b.index()), Ok(b));
        }
        for &a in VertexAttribute::ALL {
            assert_eq!(VertexAttribute::try_from(u32::from(a)), Ok(a));
        }
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        let err = BufferIndex::try_from(3).unwrap_err();
        assert_eq!(err.family, "BufferIndex");
        assert_eq!(err.value, 3);
        assert!(VertexAttribute::try_from(2).is_err());
    }

    #[test]
    fn all_is_sorted_by_index() {
        assert!(BufferIndex::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(VertexAttribute::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
