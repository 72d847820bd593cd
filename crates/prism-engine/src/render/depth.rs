/// Depth/stencil format used by every pipeline that draws into a [`DepthTarget`].
///
/// `Depth24PlusStencil8` needs no optional device feature.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Depth/stencil texture that tracks the color target's size.
pub struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: (u32, u32),
}

impl DepthTarget {
    pub fn new(device: &wgpu::Device, size: (u32, u32)) -> Self {
        let size = (size.0.max(1), size.1.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism depth stencil"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { _texture: texture, view, size }
    }

    /// Recreates the texture if `size` differs from the current one.
    pub fn ensure_size(&mut self, device: &wgpu::Device, size: (u32, u32)) {
        if self.size == (size.0.max(1), size.1.max(1)) {
            return;
        }
        log::debug!("depth target resized to {}x{}", size.0, size.1);
        *self = Self::new(device, size);
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}
