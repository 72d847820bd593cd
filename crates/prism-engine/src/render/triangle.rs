use wgpu::util::DeviceExt;

use prism_layout::{wgsl, BufferIndex, Uniforms};

use super::depth::{DepthTarget, DEPTH_FORMAT};
use super::uniform_ring::{UniformRing, MAX_BUFFERS_IN_FLIGHT};
use super::vertex::VertexDescriptor;
use super::{RenderCtx, RenderTarget, RendererError};

pub const TRIANGLE_POSITIONS: [[f32; 3]; 3] = [[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]];
pub const TRIANGLE_COLORS: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
pub const TRIANGLE_INDICES: [u16; 3] = [0, 1, 2];

const UNIFORMS_BINDING_SIZE: wgpu::BufferSize =
    match wgpu::BufferSize::new(std::mem::size_of::<Uniforms>() as u64) {
        Some(size) => size,
        None => panic!("Uniforms is zero-sized"),
    };

/// Fixed-function state and per-frame data for [`TriangleRenderer`].
#[derive(Debug, Clone)]
pub struct TriangleConfig {
    /// Written to the uniform ring every frame.
    pub uniforms: Uniforms,
    pub cull_mode: Option<wgpu::Face>,
    pub front_face: wgpu::FrontFace,
    pub depth_compare: wgpu::CompareFunction,
}

impl Default for TriangleConfig {
    fn default() -> Self {
        Self {
            uniforms: Uniforms::scale(0.5),
            cull_mode: Some(wgpu::Face::Back),
            front_face: wgpu::FrontFace::Ccw,
            depth_compare: wgpu::CompareFunction::Less,
        }
    }
}

/// Returns the complete WGSL for the triangle pipeline.
pub(crate) fn shader_source() -> Result<String, RendererError> {
    Ok(wgsl::compose(include_str!("shaders/triangle.wgsl"))?)
}

/// Draws one vertex-colored triangle with a per-frame transform.
///
/// Position and color live in separate vertex buffers at their
/// `BufferIndex` slots; the transform is read from a ring of uniform slots
/// bound at `BufferIndex::Uniforms` with a dynamic offset.
pub struct TriangleRenderer {
    config: TriangleConfig,
    vertex_descriptor: VertexDescriptor,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    ring: Option<UniformRing>,
    uniform_buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,

    position_vbo: Option<wgpu::Buffer>,
    color_vbo: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,

    depth: Option<DepthTarget>,
}

impl TriangleRenderer {
    pub fn new(config: TriangleConfig) -> Self {
        Self {
            config,
            vertex_descriptor: VertexDescriptor::position_color(),
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            ring: None,
            uniform_buffer: None,
            bind_group: None,
            position_vbo: None,
            color_vbo: None,
            index_buffer: None,
            depth: None,
        }
    }

    /// Replaces the vertex descriptor; the pipeline is rebuilt on the next frame.
    pub fn set_vertex_descriptor(&mut self, descriptor: VertexDescriptor) {
        self.vertex_descriptor = descriptor;
        self.pipeline = None;
        self.pipeline_format = None;
    }

    /// Records the triangle pass into `target`.
    ///
    /// The color attachment is loaded (the frame was already cleared); depth
    /// and stencil are cleared here.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
    ) -> Result<(), RendererError> {
        self.ensure_pipeline(ctx)?;
        self.ensure_mesh(ctx);
        self.ensure_uniforms(ctx);
        self.ensure_depth(ctx);

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.write_uniforms(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else { return Ok(()) };
        let Some(bind_group) = self.bind_group.as_ref() else { return Ok(()) };
        let Some(ring) = self.ring.as_ref() else { return Ok(()) };
        let Some(position_vbo) = self.position_vbo.as_ref() else { return Ok(()) };
        let Some(color_vbo) = self.color_vbo.as_ref() else { return Ok(()) };
        let Some(index_buffer) = self.index_buffer.as_ref() else { return Ok(()) };
        let Some(depth) = self.depth.as_ref() else { return Ok(()) };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Primary Render Encoder"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(0),
                    store: wgpu::StoreOp::Store,
                }),
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.push_debug_group("Draw Triangle");

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[ring.dynamic_offset()]);
        rpass.set_vertex_buffer(BufferIndex::MeshPositions.index(), position_vbo.slice(..));
        rpass.set_vertex_buffer(BufferIndex::MeshColors.index(), color_vbo.slice(..));
        rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..TRIANGLE_INDICES.len() as u32, 0, 0..1);

        rpass.pop_debug_group();
        Ok(())
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) -> Result<(), RendererError> {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return Ok(());
        }

        self.vertex_descriptor.validate()?;

        let shader_src = shader_source()?;
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism triangle shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("prism uniforms bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: BufferIndex::Uniforms.index(),
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(UNIFORMS_BINDING_SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("prism triangle pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        // Buffer layouts are listed in BufferIndex order (checked by validate).
        let attributes: Vec<Vec<wgpu::VertexAttribute>> = self
            .vertex_descriptor
            .layouts
            .iter()
            .map(|l| self.vertex_descriptor.wgpu_attributes(l.buffer))
            .collect();
        let buffers: Vec<wgpu::VertexBufferLayout<'_>> = self
            .vertex_descriptor
            .layouts
            .iter()
            .zip(&attributes)
            .map(|(l, attrs)| wgpu::VertexBufferLayout {
                array_stride: l.stride,
                step_mode: l.step_mode,
                attributes: attrs,
            })
            .collect();

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("RenderPipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vertex_main"),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fragment_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: self.config.front_face,
                cull_mode: self.config.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: self.config.depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!("triangle pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bind group references the old layout.
        self.bind_group = None;
        Ok(())
    }

    fn ensure_mesh(&mut self, ctx: &RenderCtx<'_>) {
        if self.position_vbo.is_some() && self.color_vbo.is_some() && self.index_buffer.is_some() {
            return;
        }

        self.position_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism mesh positions"),
            contents: bytemuck::cast_slice(&TRIANGLE_POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.color_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism mesh colors"),
            contents: bytemuck::cast_slice(&TRIANGLE_COLORS),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.index_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism mesh indices"),
            contents: bytemuck::cast_slice(&TRIANGLE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_uniforms(&mut self, ctx: &RenderCtx<'_>) {
        if self.uniform_buffer.is_none() {
            let ring = UniformRing::new(ctx.uniform_offset_alignment(), MAX_BUFFERS_IN_FLIGHT);
            self.uniform_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("UniformBuffer"),
                size: ring.buffer_size(),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.ring = Some(ring);
            self.bind_group = None;
        }

        if self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(buffer) = self.uniform_buffer.as_ref() else { return };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism uniforms bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: BufferIndex::Uniforms.index(),
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: Some(UNIFORMS_BINDING_SIZE),
                }),
            }],
        }));
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>) {
        match self.depth.as_mut() {
            Some(depth) => depth.ensure_size(ctx.device, ctx.target_size),
            None => self.depth = Some(DepthTarget::new(ctx.device, ctx.target_size)),
        }
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>) {
        let (Some(ring), Some(buffer)) = (self.ring.as_mut(), self.uniform_buffer.as_ref()) else {
            return;
        };
        ring.write_next(ctx.queue, buffer, &self.config.uniforms);
    }
}

impl Default for TriangleRenderer {
    fn default() -> Self {
        Self::new(TriangleConfig::default())
    }
}
