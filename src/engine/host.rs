//! Mounting the engine into a host container and driving it frame by frame.
//!
//! ```text
//! Uninitialized → Initializing → Ready ⇄ ResizeHandling
//!                      │           │  │        │
//!                      └→ Failed ←─┘  └→ Destroyed ←┘
//! ```
//!
//! `Failed` and `Destroyed` are terminal. Initialization failures never
//! escape [`RenderLoop::mount`]: the loop lands in `Failed` and the
//! container shows a fallback message instead.

use std::fmt;

use super::events::{
    resize_channel, ResizeEvent, ResizeReceiver, ResizeSender, StopSignal,
    SurfaceSize,
};
use super::SolidsEngine;
use crate::error::PlatonicError;
use crate::gpu::render_context::{RenderContext, RenderContextError};
use crate::gpu::shader::ShaderProgram;
use crate::options::Options;

/// Fallback text when the host cannot present GPU output at all.
pub const UNSUPPORTED_MESSAGE: &str = "WebGPU not supported";

/// Fallback text when no adapter or device could be acquired.
pub const ADAPTER_UNAVAILABLE_MESSAGE: &str = "WebGPU adapter not available";

/// The element the renderer draws into.
pub trait Container {
    /// Size in logical units.
    fn logical_size(&self) -> (f64, f64);

    /// Physical pixels per logical unit.
    fn device_pixel_ratio(&self) -> f64;

    /// Replace the container's content with `message`.
    fn show_fallback(&mut self, message: &str);

    /// Current drawing-surface size in pixels. Hosts that know the exact
    /// pixel size override this.
    fn pixel_size(&self) -> SurfaceSize {
        let (width, height) = self.logical_size();
        SurfaceSize::from_logical(width, height, self.device_pixel_ratio())
    }
}

/// Lifecycle of a [`RenderLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopState {
    /// Created, nothing acquired.
    Uninitialized,
    /// Acquiring GPU objects.
    Initializing,
    /// Drawing frames.
    Ready,
    /// Rebuilding size-dependent resources; no draw may run.
    ResizeHandling,
    /// Initialization or the device failed. Terminal.
    Failed,
    /// Stopped by the host. Terminal.
    Destroyed,
}

impl LoopState {
    /// Whether the lifecycle allows moving from `self` to `to`.
    pub fn can_transition(self, to: Self) -> bool {
        use LoopState::{
            Destroyed, Failed, Initializing, Ready, ResizeHandling,
            Uninitialized,
        };
        matches!(
            (self, to),
            (Uninitialized, Initializing)
                | (Initializing | Ready, Ready | Failed)
                | (Ready, ResizeHandling)
                | (ResizeHandling, Ready)
                | (Ready | ResizeHandling, Destroyed)
        ) && self != to
    }

    /// `Failed` or `Destroyed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Destroyed)
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::ResizeHandling => "resize-handling",
            Self::Failed => "failed",
            Self::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// What the host should do after a [`RenderLoop::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule the next frame.
    Continue,
    /// Nothing to draw yet; wait for the next callback.
    Idle,
    /// The loop is finished; stop scheduling frames.
    Exit,
}

/// Fallback text for an initialization failure.
pub fn fallback_message(error: &PlatonicError) -> &'static str {
    match error {
        PlatonicError::Gpu(
            RenderContextError::AdapterRequest(_)
            | RenderContextError::DeviceRequest(_),
        ) => ADAPTER_UNAVAILABLE_MESSAGE,
        _ => UNSUPPORTED_MESSAGE,
    }
}

/// The engine plus its lifecycle, resize queue, and stop flag.
pub struct RenderLoop {
    state: LoopState,
    engine: Option<SolidsEngine>,
    resize_tx: ResizeSender,
    resize_rx: ResizeReceiver,
    stop: StopSignal,
    failure: Option<PlatonicError>,
}

impl RenderLoop {
    fn new() -> Self {
        let (resize_tx, resize_rx) = resize_channel();
        Self {
            state: LoopState::Uninitialized,
            engine: None,
            resize_tx,
            resize_rx,
            stop: StopSignal::new(),
            failure: None,
        }
    }

    /// Initialize the engine inside `container`.
    ///
    /// Options and the shader are checked before any GPU object is
    /// requested. `target` is the presentation surface; `None` renders
    /// offscreen. On failure the returned loop is in
    /// [`LoopState::Failed`], [`failure`](Self::failure) holds the cause,
    /// and the container shows the matching fallback text. A missing
    /// container is only logged.
    pub async fn mount<C: Container + ?Sized>(
        container: Option<&mut C>,
        instance: &wgpu::Instance,
        target: Option<wgpu::SurfaceTarget<'static>>,
        options: Options,
    ) -> Self {
        let mut this = Self::new();
        let _ = this.transition(LoopState::Initializing);

        let Some(container) = container else {
            log::error!("no container to mount the renderer into");
            this.fail(PlatonicError::MissingContainer);
            return this;
        };

        let size = container.pixel_size();
        match Self::init_engine(instance, target, size, options).await {
            Ok(engine) => {
                this.engine = Some(engine);
                let _ = this.transition(LoopState::Ready);
            }
            Err(e) => {
                log::error!("renderer initialization failed: {e}");
                container.show_fallback(fallback_message(&e));
                this.fail(e);
            }
        }
        this
    }

    async fn init_engine(
        instance: &wgpu::Instance,
        target: Option<wgpu::SurfaceTarget<'static>>,
        size: SurfaceSize,
        options: Options,
    ) -> Result<SolidsEngine, PlatonicError> {
        options.validate()?;
        let program =
            ShaderProgram::load_or_embedded(options.shader.path.as_deref())?;
        let context = RenderContext::new(instance, target, size).await?;
        SolidsEngine::new(context, &program, options).await
    }

    /// Advance one frame.
    ///
    /// Checks the stop signal, applies the latest queued resize, draws,
    /// then checks the stop signal again before asking for another frame.
    pub fn tick(&mut self) -> LoopControl {
        match self.state {
            LoopState::Ready => {}
            LoopState::Uninitialized
            | LoopState::Initializing
            | LoopState::ResizeHandling => return LoopControl::Idle,
            LoopState::Failed | LoopState::Destroyed => {
                return LoopControl::Exit;
            }
        }

        if self.stop.is_stopped() {
            self.destroy();
            return LoopControl::Exit;
        }

        if let Some(event) = self.resize_rx.drain_latest() {
            self.apply_resize(event);
        }

        let Some(engine) = self.engine.as_mut() else {
            return LoopControl::Exit;
        };
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                engine.context.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("device out of memory while acquiring a frame");
                self.engine = None;
                self.fail(PlatonicError::Allocation(
                    "surface out of memory".to_owned(),
                ));
                return LoopControl::Exit;
            }
            Err(e) => log::warn!("skipped frame: {e}"),
        }

        if self.stop.is_stopped() {
            self.destroy();
            return LoopControl::Exit;
        }
        LoopControl::Continue
    }

    fn apply_resize(&mut self, event: ResizeEvent) {
        if !self.transition(LoopState::ResizeHandling) {
            return;
        }
        let size = event.pixel_size();
        if let Some(engine) = self.engine.as_mut() {
            if engine.resize(size) {
                log::debug!("resized to {}x{}", size.width, size.height);
            }
        }
        let _ = self.transition(LoopState::Ready);
    }

    /// Stop now: drop the engine and enter [`LoopState::Destroyed`].
    ///
    /// No-op unless the loop is running.
    pub fn destroy(&mut self) {
        if self.transition(LoopState::Destroyed) {
            if let Some(engine) = self.engine.take() {
                log::info!(
                    "render loop destroyed after {} frames ({:.1} fps)",
                    engine.frame_count(),
                    engine.fps()
                );
            }
        }
    }

    fn fail(&mut self, error: PlatonicError) {
        let _ = self.transition(LoopState::Failed);
        self.failure = Some(error);
    }

    fn transition(&mut self, to: LoopState) -> bool {
        if self.state.can_transition(to) {
            log::trace!("render loop: {} -> {to}", self.state);
            self.state = to;
            true
        } else {
            log::error!(
                "refused render loop transition {} -> {to}",
                self.state
            );
            false
        }
    }

    /// Handle for queueing resizes from the host's event source.
    pub fn resize_sender(&self) -> ResizeSender {
        self.resize_tx.clone()
    }

    /// Handle for stopping the loop from the host.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Why the loop failed, if it did.
    pub fn failure(&self) -> Option<&PlatonicError> {
        self.failure.as_ref()
    }

    /// The engine, while the loop is running.
    pub fn engine(&self) -> Option<&SolidsEngine> {
        self.engine.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestContainer {
        fallback: Option<String>,
    }

    impl Container for TestContainer {
        fn logical_size(&self) -> (f64, f64) {
            (160.0, 120.0)
        }

        fn device_pixel_ratio(&self) -> f64 {
            2.0
        }

        fn show_fallback(&mut self, message: &str) {
            self.fallback = Some(message.to_owned());
        }
    }

    fn no_backends() -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::empty(),
            ..Default::default()
        })
    }

    fn mount(
        container: Option<&mut TestContainer>,
        instance: &wgpu::Instance,
        options: Options,
    ) -> RenderLoop {
        pollster::block_on(RenderLoop::mount(
            container, instance, None, options,
        ))
    }

    /// Mount headless on a real adapter. Panics when none is available.
    fn mount_headless() -> (RenderLoop, TestContainer) {
        let mut container = TestContainer::default();
        let render_loop = mount(
            Some(&mut container),
            &wgpu::Instance::default(),
            Options::default(),
        );
        assert_eq!(
            render_loop.state(),
            LoopState::Ready,
            "headless mount failed: {:?}",
            render_loop.failure()
        );
        (render_loop, container)
    }

    #[test]
    fn transition_table() {
        use LoopState::{
            Destroyed, Failed, Initializing, Ready, ResizeHandling,
            Uninitialized,
        };
        let all = [
            Uninitialized,
            Initializing,
            Ready,
            ResizeHandling,
            Failed,
            Destroyed,
        ];
        let allowed = [
            (Uninitialized, Initializing),
            (Initializing, Ready),
            (Initializing, Failed),
            (Ready, ResizeHandling),
            (Ready, Failed),
            (Ready, Destroyed),
            (ResizeHandling, Ready),
            (ResizeHandling, Destroyed),
        ];
        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
        assert!(Failed.is_terminal() && Destroyed.is_terminal());
        assert!(!Ready.is_terminal());
    }

    #[test]
    fn unavailable_adapter_shows_fallback() {
        let mut container = TestContainer::default();
        let mut render_loop =
            mount(Some(&mut container), &no_backends(), Options::default());

        assert_eq!(render_loop.state(), LoopState::Failed);
        assert_eq!(
            container.fallback.as_deref(),
            Some(ADAPTER_UNAVAILABLE_MESSAGE)
        );
        assert!(render_loop.engine().is_none());
        assert!(matches!(
            render_loop.failure(),
            Some(PlatonicError::Gpu(RenderContextError::AdapterRequest(_)))
        ));
        assert_eq!(render_loop.tick(), LoopControl::Exit);
    }

    #[test]
    fn missing_container_aborts_without_fallback() {
        let render_loop = mount(None, &no_backends(), Options::default());
        assert_eq!(render_loop.state(), LoopState::Failed);
        assert!(matches!(
            render_loop.failure(),
            Some(PlatonicError::MissingContainer)
        ));
    }

    #[test]
    fn shader_load_failure_is_terminal() {
        let mut container = TestContainer::default();
        let mut options = Options::default();
        options.shader.path = Some("no/such/shader.wgsl".into());
        let render_loop = mount(Some(&mut container), &no_backends(), options);

        assert_eq!(render_loop.state(), LoopState::Failed);
        assert_eq!(container.fallback.as_deref(), Some(UNSUPPORTED_MESSAGE));
        assert!(matches!(
            render_loop.failure(),
            Some(PlatonicError::Shader(_))
        ));
    }

    #[test]
    fn invalid_options_are_terminal() {
        let mut container = TestContainer::default();
        let mut options = Options::default();
        options.camera.znear = -1.0;
        let render_loop = mount(Some(&mut container), &no_backends(), options);
        assert_eq!(render_loop.state(), LoopState::Failed);
        assert_eq!(container.fallback.as_deref(), Some(UNSUPPORTED_MESSAGE));
    }

    #[test]
    fn container_pixel_size_uses_ratio() {
        let container = TestContainer::default();
        assert_eq!(container.pixel_size(), SurfaceSize::new(320, 240));
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn ticks_resizes_and_stops() {
        let (mut render_loop, container) = mount_headless();
        assert!(container.fallback.is_none());
        let depth_size =
            |l: &RenderLoop| l.engine().map(|e| e.depth().size());
        assert_eq!(
            depth_size(&render_loop),
            Some(SurfaceSize::new(320, 240))
        );

        assert_eq!(render_loop.tick(), LoopControl::Continue);

        let resizes = render_loop.resize_sender();
        for width in [100.0, 200.0] {
            assert!(resizes.send(ResizeEvent::logical(width, 50.0, 1.5)));
        }
        assert_eq!(render_loop.tick(), LoopControl::Continue);
        assert_eq!(render_loop.state(), LoopState::Ready);
        let engine = render_loop.engine().unwrap();
        assert_eq!(engine.depth().size(), SurfaceSize::new(300, 75));
        assert_eq!(engine.depth().generation(), 1);

        // Odd window sizes reach the depth texture unchanged.
        assert!(resizes.send(ResizeEvent::physical(29, 41)));
        assert_eq!(render_loop.tick(), LoopControl::Continue);
        let engine = render_loop.engine().unwrap();
        assert_eq!(engine.depth().size(), SurfaceSize::new(29, 41));
        assert_eq!(engine.frame_count(), 3);

        render_loop.stop_signal().request_stop();
        assert_eq!(render_loop.tick(), LoopControl::Exit);
        assert_eq!(render_loop.state(), LoopState::Destroyed);
        assert!(render_loop.engine().is_none());
        assert_eq!(render_loop.tick(), LoopControl::Exit);
    }
}
