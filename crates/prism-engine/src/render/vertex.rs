use prism_layout::{BufferIndex, VertexAttribute};

use super::RendererError;

/// One vertex attribute and the buffer it reads from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributeDesc {
    pub attribute: VertexAttribute,
    pub buffer: BufferIndex,
    pub format: wgpu::VertexFormat,
    pub offset: u64,
}

/// Stride and step mode for one vertex buffer slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BufferLayoutDesc {
    pub buffer: BufferIndex,
    pub stride: u64,
    pub step_mode: wgpu::VertexStepMode,
}

/// Host-side description of how mesh buffers feed vertex attributes.
///
/// wgpu identifies a vertex buffer by its position in the pipeline's buffer
/// list, so layouts must cover buffer indices `0..n` in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexDescriptor {
    pub attributes: Vec<AttributeDesc>,
    pub layouts: Vec<BufferLayoutDesc>,
}

impl VertexDescriptor {
    /// Separate position and color streams, three floats each.
    pub fn position_color() -> Self {
        let stride = wgpu::VertexFormat::Float32x3.size();
        Self {
            attributes: vec![
                AttributeDesc {
                    attribute: VertexAttribute::Position,
                    buffer: BufferIndex::MeshPositions,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                },
                AttributeDesc {
                    attribute: VertexAttribute::Color,
                    buffer: BufferIndex::MeshColors,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                },
            ],
            layouts: BufferIndex::MESH
                .iter()
                .map(|&buffer| BufferLayoutDesc {
                    buffer,
                    stride,
                    step_mode: wgpu::VertexStepMode::Vertex,
                })
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), RendererError> {
        let bad = |why: String| Err(RendererError::BadVertexDescriptor(why));

        for (slot, layout) in self.layouts.iter().enumerate() {
            if !layout.buffer.is_mesh() {
                return bad(format!("{:?} is not a mesh buffer", layout.buffer));
            }
            if layout.buffer.slot() != slot {
                return bad(format!(
                    "{:?} (index {}) listed at vertex buffer slot {slot}",
                    layout.buffer,
                    layout.buffer.index()
                ));
            }
            if layout.stride == 0 {
                return bad(format!("{:?} has zero stride", layout.buffer));
            }
        }

        for (i, attr) in self.attributes.iter().enumerate() {
            if self.attributes[..i].iter().any(|a| a.attribute == attr.attribute) {
                return bad(format!("{:?} is described twice", attr.attribute));
            }

            let Some(layout) = self.layouts.iter().find(|l| l.buffer == attr.buffer) else {
                return bad(format!(
                    "{:?} reads {:?}, which has no buffer layout",
                    attr.attribute, attr.buffer
                ));
            };

            if attr.offset + attr.format.size() > layout.stride {
                return bad(format!(
                    "{:?} overruns the {}-byte stride of {:?}",
                    attr.attribute, layout.stride, attr.buffer
                ));
            }
        }

        Ok(())
    }

    /// wgpu attributes that read from `buffer`.
    pub fn wgpu_attributes(&self, buffer: BufferIndex) -> Vec<wgpu::VertexAttribute> {
        self.attributes
            .iter()
            .filter(|a| a.buffer == buffer)
            .map(|a| wgpu::VertexAttribute {
                format: a.format,
                offset: a.offset,
                shader_location: a.attribute.index(),
            })
            .collect()
    }
}
