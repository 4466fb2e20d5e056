use std::fmt;

use crate::engine::events::SurfaceSize;

/// Color format used when there is no presentation surface.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Rgba8Unorm;

/// Errors that can occur during GPU context initialization.
#[derive(Debug)]
pub enum RenderContextError {
    /// Failed to create a wgpu surface from the window handle.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    AdapterRequest(wgpu::RequestAdapterError),
    /// GPU device request failed (limits or features not met).
    DeviceRequest(wgpu::RequestDeviceError),
    /// Surface configuration not supported by the selected adapter.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => {
                write!(f, "surface creation failed: {e}")
            }
            Self::AdapterRequest(e) => {
                write!(f, "no compatible GPU adapter found: {e}")
            }
            Self::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            Self::UnsupportedSurface => {
                write!(f, "surface configuration not supported by adapter")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// Owns the core wgpu resources: device, queue, surface, and configuration.
pub struct RenderContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
    /// The window surface for presentation (`None` in headless mode).
    pub surface: Option<wgpu::Surface<'static>>,
    /// Current surface configuration (format, size, present mode).
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Acquire an adapter and device, and configure `target` for
    /// presentation if one is given.
    ///
    /// Without a target the context renders offscreen in
    /// [`OFFSCREEN_FORMAT`]. Nothing is submitted to the GPU here; if the
    /// adapter request fails no device is ever created.
    ///
    /// # Errors
    ///
    /// Returns `RenderContextError` if surface creation, adapter request,
    /// device request, or surface configuration fails.
    pub async fn new(
        instance: &wgpu::Instance,
        target: Option<wgpu::SurfaceTarget<'static>>,
        size: SurfaceSize,
    ) -> Result<Self, RenderContextError> {
        let surface = target
            .map(|t| instance.create_surface(t))
            .transpose()
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: surface.as_ref(),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Primary Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let size = size.non_zero();
        let config = match surface {
            Some(ref surface) => {
                let mut config = surface
                    .get_default_config(&adapter, size.width, size.height)
                    .ok_or(RenderContextError::UnsupportedSurface)?;
                // The palette is authored in display space; keep it out of
                // the sRGB encoder.
                if let Some(linear) = surface
                    .get_capabilities(&adapter)
                    .formats
                    .into_iter()
                    .find(|f| !f.is_srgb())
                {
                    config.format = linear;
                }
                config.present_mode = wgpu::PresentMode::Fifo;
                surface.configure(&device, &config);
                config
            }
            None => offscreen_config(OFFSCREEN_FORMAT, size),
        };

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Create a render context from an externally-owned device and queue
    /// (no surface, for embedding or headless rendering).
    #[must_use]
    pub fn from_device(
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        size: SurfaceSize,
    ) -> Self {
        Self {
            device,
            queue,
            surface: None,
            config: offscreen_config(format, size.non_zero()),
        }
    }

    /// The color target format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current target size in pixels.
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.width, self.config.height)
    }

    /// Width over height of the current target.
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Reconfigure the surface for the new size. Ignores zero-sized
    /// dimensions.
    pub fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.reconfigure();
    }

    /// Re-apply the current configuration (after a lost/outdated surface).
    pub fn reconfigure(&self) {
        if let Some(ref surface) = self.surface {
            surface.configure(&self.device, &self.config);
        }
    }

    /// Acquire the next swapchain texture for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the surface is lost, outdated,
    /// or timed out, or if no surface is available (headless mode).
    pub fn get_next_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface
            .as_ref()
            .map_or(Err(wgpu::SurfaceError::Lost), |surface| {
                surface.get_current_texture()
            })
    }

    /// Returns `true` if this context has a presentation surface.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Create a new command encoder for recording GPU commands.
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Finish the encoder and submit its command buffer to the GPU queue.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}

fn offscreen_config(
    format: wgpu::TextureFormat,
    size: SurfaceSize,
) -> wgpu::SurfaceConfiguration {
    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width,
        height: size.height,
        present_mode: wgpu::PresentMode::Fifo,
        desired_maximum_frame_latency: 2,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
    }
}
