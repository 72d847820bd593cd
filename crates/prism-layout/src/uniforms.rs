use bytemuck::{Pod, Zeroable};

/// 4x4 single-precision matrix, column-major (`m[column][row]`).
///
/// Matches WGSL `mat4x4<f32>`: 16 tightly packed floats, 64 bytes.
pub type Mat4 = [[f32; 4]; 4];

/// Per-draw uniform data, read by the shader at `BufferIndex::Uniforms`.
///
/// The shader-side declaration is produced by [`crate::wgsl::prelude`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub transform: Mat4,
}

const _: () = {
    assert!(std::mem::size_of::<Uniforms>() == 64);
    assert!(std::mem::offset_of!(Uniforms, transform) == 0);
    // WGSL aligns mat4x4<f32> to 16; the host struct must not demand more.
    assert!(std::mem::align_of::<Uniforms>() <= 16);
    assert!(std::mem::size_of::<Uniforms>() % 16 == 0);
};

impl Uniforms {
    pub const IDENTITY: Self = Self::from_diagonal([1.0, 1.0, 1.0, 1.0]);

    #[inline]
    pub const fn new(transform: Mat4) -> Self {
        Self { transform }
    }

    /// Matrix with `d` on the diagonal and zeros elsewhere.
    pub const fn from_diagonal(d: [f32; 4]) -> Self {
        Self {
            transform: [
                [d[0], 0.0, 0.0, 0.0],
                [0.0, d[1], 0.0, 0.0],
                [0.0, 0.0, d[2], 0.0],
                [0.0, 0.0, 0.0, d[3]],
            ],
        }
    }

    /// Uniform scale in x/y/z, `w` left at 1.
    pub const fn scale(s: f32) -> Self {
        Self::from_diagonal([s, s, s, 1.0])
    }

    /// Raw bytes as uploaded to the GPU.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Size of one uniform slot when `Uniforms` are packed back to back at
/// dynamic offsets that must be multiples of `alignment`.
///
/// An `alignment` of 0 is treated as 1, so a slot is never smaller than
/// `Uniforms` itself.
pub const fn aligned_uniforms_size(alignment: u32) -> u64 {
    let size = std::mem::size_of::<Uniforms>() as u64;
    let alignment = if alignment == 0 { 1 } else { alignment as u64 };
    size.next_multiple_of(alignment)
}

/// Slot size under the common 256-byte dynamic offset alignment.
pub const ALIGNED_UNIFORMS_SIZE: u64 = aligned_uniforms_size(256);

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Mat4 = [
        [1.0, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
        [13.0, 14.0, 15.0, 16.0],
    ];

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn size_and_offset() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 64);
        assert_eq!(std::mem::offset_of!(Uniforms, transform), 0);
    }

    #[test]
    fn transform_is_column_major_in_memory() {
        let u = Uniforms::new(SAMPLE);
        let floats: &[f32] = bytemuck::cast_slice(u.as_bytes());
        // Column 1 starts at float 4.
        assert_eq!(&floats[4..8], &[5.0, 6.0, 7.0, 8.0]);
        assert_eq!(floats[15], 16.0);
    }

    // ── round trip ────────────────────────────────────────────────────────

    #[test]
    fn identity_round_trips_through_bytes() {
        let u = Uniforms::IDENTITY;
        let bytes = u.as_bytes().to_vec();
        let back: Uniforms = bytemuck::pod_read_unaligned(&bytes);
        assert_eq!(back, u);
        assert_eq!(bytemuck::bytes_of(&back.transform), bytemuck::bytes_of(&u.transform));
    }

    #[test]
    fn arbitrary_matrix_round_trips() {
        let u = Uniforms::new(SAMPLE);
        let back: &Uniforms = bytemuck::from_bytes(u.as_bytes());
        assert_eq!(back.transform, SAMPLE);
    }

    // ── constructors ──────────────────────────────────────────────────────

    #[test]
    fn scale_keeps_w() {
        let u = Uniforms::scale(0.5);
        assert_eq!(u, Uniforms::from_diagonal([0.5, 0.5, 0.5, 1.0]));
        assert_eq!(u.transform[0][1], 0.0);
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Uniforms::default(), Uniforms::IDENTITY);
        assert_eq!(Uniforms::zeroed().transform, [[0.0; 4]; 4]);
    }

    // ── slot sizing ───────────────────────────────────────────────────────

    #[test]
    fn aligned_size_rounds_up() {
        assert_eq!(ALIGNED_UNIFORMS_SIZE, 256);
        assert_eq!(aligned_uniforms_size(64), 64);
        assert_eq!(aligned_uniforms_size(16), 64);
        assert_eq!(aligned_uniforms_size(512), 512);
    }

    #[test]
    fn zero_alignment_keeps_full_slot() {
        assert_eq!(aligned_uniforms_size(0), 64);
        assert_eq!(aligned_uniforms_size(1), 64);
    }
}
