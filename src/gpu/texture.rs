//! Size-dependent render attachments: the depth buffer and the headless
//! color target.

use crate::engine::events::SurfaceSize;

/// Depth buffer matching the drawing surface.
///
/// Recreated on every applied resize; the old texture is destroyed before
/// the new one is allocated. `generation` counts rebuilds.
pub struct DepthTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: SurfaceSize,
    generation: u64,
}

impl DepthTexture {
    /// Depth format shared with the pipelines.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Allocate a depth texture of `size` (zero dimensions are raised to 1).
    #[must_use]
    pub fn new(device: &wgpu::Device, size: SurfaceSize) -> Self {
        let size = size.non_zero();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size,
            generation: 0,
        }
    }

    /// Release the current texture and allocate one of `size`.
    pub fn recreate(&mut self, device: &wgpu::Device, size: SurfaceSize) {
        self.texture.destroy();
        let generation = self.generation + 1;
        *self = Self::new(device, size);
        self.generation = generation;
        log::debug!(
            "depth texture rebuilt at {}x{} (generation {generation})",
            self.size.width,
            self.size.height
        );
    }

    /// Release the GPU memory now rather than on drop.
    pub fn destroy(&self) {
        self.texture.destroy();
    }

    /// View bound as the render pass depth attachment.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Current size in pixels.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Number of rebuilds since creation.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Color target used when the context has no presentation surface.
///
/// Created with `RENDER_ATTACHMENT | TEXTURE_BINDING | COPY_SRC` so frames
/// can be read back or composited by an embedding host.
pub struct OffscreenTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl OffscreenTarget {
    /// Create a color target of `size` in `format`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        size: SurfaceSize,
        format: wgpu::TextureFormat,
    ) -> Self {
        let size = size.non_zero();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Offscreen Target"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}
