use prism_layout::{aligned_uniforms_size, Uniforms};

/// Number of frames whose uniforms may be live at once.
pub const MAX_BUFFERS_IN_FLIGHT: usize = 3;

/// Slot bookkeeping for `Uniforms` packed into one buffer at aligned offsets.
///
/// Each frame moves to the next slot before writing, so the slot a previous
/// frame is still reading is left alone until the ring wraps.
#[derive(Debug, Clone)]
pub struct UniformRing {
    slot_size: u64,
    slots: usize,
    index: usize,
}

impl UniformRing {
    /// `alignment` is the device's dynamic uniform offset alignment.
    pub fn new(alignment: u32, slots: usize) -> Self {
        debug_assert!(slots > 0);
        Self {
            slot_size: aligned_uniforms_size(alignment),
            slots: slots.max(1),
            index: 0,
        }
    }

    /// Total bytes needed for the backing buffer.
    pub fn buffer_size(&self) -> u64 {
        self.slot_size * self.slots as u64
    }

    pub fn slot_size(&self) -> u64 {
        self.slot_size
    }

    /// Byte offset of the current slot.
    pub fn offset(&self) -> u64 {
        self.slot_size * self.index as u64
    }

    #[cfg(test)]
    fn index(&self) -> usize {
        self.index
    }

    /// Current offset in the form `set_bind_group` takes.
    pub fn dynamic_offset(&self) -> wgpu::DynamicOffset {
        self.offset() as wgpu::DynamicOffset
    }

    /// Moves to the next slot and returns its offset.
    pub fn advance(&mut self) -> u64 {
        self.index = (self.index + 1) % self.slots;
        self.offset()
    }

    /// Advances, then writes `uniforms` into the new slot.
    pub fn write_next(&mut self, queue: &wgpu::Queue, buffer: &wgpu::Buffer, uniforms: &Uniforms) {
        let offset = self.advance();
        queue.write_buffer(buffer, offset, uniforms.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_layout::ALIGNED_UNIFORMS_SIZE;

    #[test]
    fn sizes_follow_alignment() {
        let ring = UniformRing::new(256, MAX_BUFFERS_IN_FLIGHT);
        assert_eq!(ring.slot_size(), ALIGNED_UNIFORMS_SIZE);
        assert_eq!(ring.buffer_size(), 768);

        let tight = UniformRing::new(64, 2);
        assert_eq!(tight.buffer_size(), 128);
    }

    #[test]
    fn advance_cycles_through_slots() {
        let mut ring = UniformRing::new(256, MAX_BUFFERS_IN_FLIGHT);
        assert_eq!(ring.offset(), 0);
        assert_eq!(ring.advance(), 256);
        assert_eq!(ring.advance(), 512);
        assert_eq!(ring.advance(), 0);
        assert_eq!(ring.advance(), 256);
        assert_eq!(ring.dynamic_offset(), 256);
    }

    #[test]
    fn single_slot_never_moves() {
        let mut ring = UniformRing::new(256, 1);
        assert_eq!(ring.advance(), 0);
        assert_eq!(ring.index(), 0);
    }
}
