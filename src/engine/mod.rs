//! The solids engine and the host-driven render loop around it.
//!
//! [`SolidsEngine`] owns every GPU object and draws one frame per call.
//! [`RenderLoop`](host::RenderLoop) wraps it in the lifecycle state machine a
//! host drives: mount, tick per frame callback, resize, stop.

pub mod animation;
pub mod events;
pub mod host;

use self::animation::{AnimationClock, AnimationState, CameraMatrices};
use self::events::SurfaceSize;
use crate::catalog::{platonic_solids, Solid, SOLID_COUNT};
use crate::error::PlatonicError;
use crate::geometry::{generate_cylinder, generate_sphere};
use crate::gpu::render_context::RenderContext;
use crate::gpu::resources::SceneResources;
use crate::gpu::shader::ShaderProgram;
use crate::gpu::texture::{DepthTexture, OffscreenTarget};
use crate::math::lcg::Lcg;
use crate::options::Options;
use crate::renderer::SolidPipelines;
use crate::util::frame_timing::FrameTiming;

/// Renders the five rotating solids.
///
/// # Construction
///
/// Build a [`RenderContext`] (windowed or headless), load a
/// [`ShaderProgram`], then call [`SolidsEngine::new`]. Everything sized
/// by the scene is allocated there and never reallocated; only the depth
/// texture (and the headless color target) follow the surface size.
///
/// # Frame loop
///
/// Call [`render`](Self::render) once per frame and
/// [`resize`](Self::resize) when the surface size changes. A context
/// without a surface renders into an internal [`OffscreenTarget`];
/// [`render_to_texture`](Self::render_to_texture) draws into a view owned
/// by the caller instead.
pub struct SolidsEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    pipelines: SolidPipelines,
    resources: SceneResources,
    solids: [Solid; SOLID_COUNT],
    animation: AnimationState,
    clock: AnimationClock,
    depth: DepthTexture,
    offscreen: Option<OffscreenTarget>,
    options: Options,
    frame_timing: FrameTiming,
}

impl SolidsEngine {
    /// Generate meshes, create pipelines, and allocate all scene buffers.
    ///
    /// Pipeline creation runs inside a validation error scope and buffer
    /// allocation inside an out-of-memory scope; either reporting an error
    /// fails construction.
    ///
    /// # Errors
    ///
    /// Returns [`PlatonicError`] if the options are invalid, a mesh cannot
    /// be generated, or the device rejects a pipeline or allocation.
    pub async fn new(
        context: RenderContext,
        program: &ShaderProgram,
        options: Options,
    ) -> Result<Self, PlatonicError> {
        options.validate()?;
        let sphere = generate_sphere(options.scene.sphere_segments)?;
        let cylinder = generate_cylinder(options.scene.cylinder_segments)?;
        let solids = platonic_solids();

        let device = &context.device;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipelines = SolidPipelines::new(&context, program);
        if let Some(e) = device.pop_error_scope().await {
            return Err(PlatonicError::Pipeline(e.to_string()));
        }

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let resources = SceneResources::new(
            device, &pipelines, &sphere, &cylinder, &solids,
        );
        let size = context.size();
        let depth = DepthTexture::new(device, size);
        let offscreen = (!context.has_surface())
            .then(|| OffscreenTarget::new(device, size, context.format()));
        if let Some(e) = device.pop_error_scope().await {
            return Err(PlatonicError::Allocation(e.to_string()));
        }

        let mut rng = Lcg::new(options.scene.seed);
        let animation =
            AnimationState::new(&mut rng, solids.len(), &options.scene);
        log::info!(
            "engine ready: {} solids at {}x{} ({:?})",
            solids.len(),
            size.width,
            size.height,
            context.format()
        );

        Ok(Self {
            frame_timing: FrameTiming::new(options.frame.target_fps),
            context,
            pipelines,
            resources,
            solids,
            animation,
            clock: AnimationClock::start(),
            depth,
            offscreen,
            options,
        })
    }

    /// Draw and present one frame.
    ///
    /// Without a presentation surface the frame lands in the internal
    /// offscreen target. Returns early without drawing while the frame cap
    /// says it is too soon.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        self.write_uniforms(self.clock.elapsed());

        if let Some(ref offscreen) = self.offscreen {
            let encoder = self.encode_frame(&offscreen.view);
            self.context.submit(encoder);
            self.frame_timing.end_frame();
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.encode_frame(&view);
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Render the scene into `view`. The caller owns the texture, which must
    /// match the context's format and size; nothing is presented.
    ///
    /// This is the entry point for a host that supplies its own device
    /// through [`RenderContext::from_device`] and composites the result.
    pub fn render_to_texture(&mut self, view: &wgpu::TextureView) {
        self.write_uniforms(self.clock.elapsed());
        let encoder = self.encode_frame(view);
        self.context.submit(encoder);
        self.frame_timing.end_frame();
    }

    /// Reconfigure the surface and rebuild the depth texture for `size`.
    ///
    /// Zero-area sizes are ignored and leave everything at its previous
    /// size. Returns whether the resize was applied.
    pub fn resize(&mut self, size: SurfaceSize) -> bool {
        if size.is_empty() {
            log::debug!(
                "ignoring empty resize {}x{}",
                size.width,
                size.height
            );
            return false;
        }
        self.context.resize(size);
        self.depth.recreate(&self.context.device, size);
        if self.offscreen.is_some() {
            self.offscreen = Some(OffscreenTarget::new(
                &self.context.device,
                size,
                self.context.format(),
            ));
        }
        true
    }

    /// Upload every solid's uniform block for `elapsed` seconds.
    fn write_uniforms(&self, elapsed: f32) {
        let camera =
            CameraMatrices::new(&self.options.camera, self.context.aspect());
        let uniforms = self.animation.frame_uniforms(
            elapsed,
            &camera,
            &self.options.colors,
        );
        for (i, uniform) in uniforms.iter().enumerate() {
            self.resources.write_uniform(&self.context.queue, i, uniform);
        }
    }

    /// Encode the single render pass: cylinders for every solid, then
    /// spheres for every solid.
    fn encode_frame(&self, view: &wgpu::TextureView) -> wgpu::CommandEncoder {
        let mut encoder = self.context.create_encoder();
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("solids render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(
                            self.options.colors.clear_color(),
                        ),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: self.depth.view(),
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

            let cylinder = &self.resources.cylinder;
            rp.set_pipeline(&self.pipelines.cylinder.pipeline);
            rp.set_vertex_buffer(0, cylinder.vertex.slice(..));
            rp.set_index_buffer(
                cylinder.index.slice(..),
                wgpu::IndexFormat::Uint16,
            );
            for solid in &self.resources.solids {
                rp.set_bind_group(0, &solid.cylinder_bind_group, &[]);
                rp.set_vertex_buffer(1, solid.edge_instances.slice(..));
                rp.draw_indexed(
                    0..cylinder.index_count,
                    0,
                    0..solid.edge_count,
                );
            }

            let sphere = &self.resources.sphere;
            rp.set_pipeline(&self.pipelines.sphere.pipeline);
            rp.set_vertex_buffer(0, sphere.vertex.slice(..));
            rp.set_index_buffer(
                sphere.index.slice(..),
                wgpu::IndexFormat::Uint16,
            );
            for solid in &self.resources.solids {
                rp.set_bind_group(0, &solid.sphere_bind_group, &[]);
                rp.set_vertex_buffer(1, solid.vertex_instances.slice(..));
                rp.draw_indexed(
                    0..sphere.index_count,
                    0,
                    0..solid.vertex_count,
                );
            }
        }
        encoder
    }

    /// The five solids, in index order.
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    /// Fixed per-solid motion.
    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Current depth texture.
    pub fn depth(&self) -> &DepthTexture {
        &self.depth
    }

    /// Internal color target, present only without a surface.
    pub fn offscreen(&self) -> Option<&OffscreenTarget> {
        self.offscreen.as_ref()
    }

    /// Options the engine was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Frames drawn so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_timing.frame_count()
    }
}

impl Drop for SolidsEngine {
    fn drop(&mut self) {
        self.depth.destroy();
        log::debug!("engine dropped after {} frames", self.frame_count());
    }
}
