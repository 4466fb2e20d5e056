//! Standalone window host backed by winit.
//!
//! The window is the render loop's [`Container`]: its inner size and scale
//! factor drive the surface size, and a fallback message replaces the
//! window title when the GPU cannot be initialized.
//!
//! ```no_run
//! # use platonic::Viewer;
//! Viewer::builder()
//!     .with_title("Platonic Solids")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    engine::events::{ResizeEvent, SurfaceSize},
    engine::host::{Container, LoopControl, LoopState, RenderLoop},
    error::PlatonicError,
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "Platonic Solids", default
    /// options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Platonic Solids".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that shows the rotating solids.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatonicError::Viewer`] if the event loop or the window
    /// cannot be created. GPU initialization failures are shown in the
    /// window instead.
    pub fn run(self) -> Result<(), PlatonicError> {
        let event_loop = EventLoop::new()
            .map_err(|e| PlatonicError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            render_loop: None,
            options: self.options,
            title: self.title,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| PlatonicError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Container ────────────────────────────────────────────────────────────

/// A winit window seen as a render container.
struct WindowContainer {
    window: Arc<Window>,
}

impl Container for WindowContainer {
    fn logical_size(&self) -> (f64, f64) {
        let size = self.window.inner_size();
        let scale = self.window.scale_factor();
        (f64::from(size.width) / scale, f64::from(size.height) / scale)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn pixel_size(&self) -> SurfaceSize {
        let size = self.window.inner_size();
        SurfaceSize::new(size.width, size.height)
    }

    fn show_fallback(&mut self, message: &str) {
        log::error!("{message}");
        self.window.set_title(message);
    }
}

/// winit already reports the exact pixel size, so it is forwarded as is.
const fn resize_event(size: PhysicalSize<u32>) -> ResizeEvent {
    ResizeEvent::physical(size.width, size.height)
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    render_loop: Option<RenderLoop>,
    options: Options,
    title: String,
    error: Option<PlatonicError>,
}

impl ViewerApp {
    fn queue_resize(&self, size: PhysicalSize<u32>) {
        if let Some(ref render_loop) = self.render_loop {
            let _ = render_loop.resize_sender().send(resize_event(size));
        }
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1000.0, 400.0));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(PlatonicError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let mut container = WindowContainer {
            window: window.clone(),
        };
        let instance = wgpu::Instance::default();
        let render_loop = pollster::block_on(RenderLoop::mount(
            Some(&mut container),
            &instance,
            Some(window.clone().into()),
            self.options.clone(),
        ));

        if render_loop.state() == LoopState::Ready {
            window.request_redraw();
        }
        self.window = Some(window);
        self.render_loop = Some(render_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(ref mut render_loop) = self.render_loop {
                    render_loop.stop_signal().request_stop();
                    let _ = render_loop.tick();
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.queue_resize(size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) =
                    self.window.as_ref().map(|window| window.inner_size())
                {
                    self.queue_resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(window), Some(render_loop)) =
                    (&self.window, &mut self.render_loop)
                else {
                    return;
                };
                match render_loop.tick() {
                    LoopControl::Continue => window.request_redraw(),
                    LoopControl::Idle => {}
                    LoopControl::Exit => {
                        if render_loop.state() == LoopState::Destroyed {
                            event_loop.exit();
                        }
                    }
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_event_keeps_window_pixels() {
        // Sizes that lose a pixel when divided by a fractional scale
        // factor and multiplied back.
        for w in [29, 41, 1001, 1366, 1500, 2561] {
            let event = resize_event(PhysicalSize::new(w, w + 1));
            assert_eq!(event.pixel_size(), SurfaceSize::new(w, w + 1));
        }
    }

    #[test]
    fn logical_round_trip_would_drop_a_pixel() {
        let lossy = SurfaceSize::from_logical(29.0 / 1.1, 41.0 / 1.1, 1.1);
        assert_ne!(lossy, SurfaceSize::new(29, 41));
    }

    #[test]
    fn builder_defaults() {
        let viewer = Viewer::builder().build();
        assert_eq!(viewer.title, "Platonic Solids");
        assert_eq!(viewer.options, Options::default());
    }
}
