//! Host-to-loop signalling: resize events and the stop flag.
//!
//! Resizes arrive from the host's event source at any time and are queued on
//! a channel; the render loop drains it once per tick, before drawing, so a
//! frame never reads a depth texture that does not match the surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Drawing-surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Size from pixel dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `floor(logical · device_pixel_ratio)` in each dimension.
    ///
    /// A non-positive or non-finite ratio is treated as 1.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_logical(
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    ) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0
        {
            device_pixel_ratio
        } else {
            1.0
        };
        let px = |v: f64| {
            (v * dpr).floor().clamp(0.0, f64::from(u32::MAX)) as u32
        };
        Self::new(px(width), px(height))
    }

    /// True if either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// This size with each dimension raised to at least 1.
    #[must_use]
    pub fn non_zero(self) -> Self {
        Self::new(self.width.max(1), self.height.max(1))
    }
}

/// The container changed size or pixel density.
///
/// Hosts that measure in logical units send [`ResizeEvent::Logical`] and
/// the pixel size is derived by flooring. Hosts that already know the exact
/// pixel size (a native window) send [`ResizeEvent::Physical`] so it is
/// never reconstructed through a lossy division.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeEvent {
    /// Size in logical units plus the density to scale them by.
    Logical {
        /// Container width in logical units.
        width: f64,
        /// Container height in logical units.
        height: f64,
        /// Physical pixels per logical unit.
        device_pixel_ratio: f64,
    },
    /// Exact size in physical pixels.
    Physical(SurfaceSize),
}

impl ResizeEvent {
    /// A resize measured in logical units.
    pub const fn logical(
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    ) -> Self {
        Self::Logical {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// A resize measured in physical pixels.
    pub const fn physical(width: u32, height: u32) -> Self {
        Self::Physical(SurfaceSize::new(width, height))
    }

    /// The surface size this event asks for.
    pub fn pixel_size(&self) -> SurfaceSize {
        match *self {
            Self::Logical {
                width,
                height,
                device_pixel_ratio,
            } => SurfaceSize::from_logical(width, height, device_pixel_ratio),
            Self::Physical(size) => size,
        }
    }
}

/// Sending half of the resize channel. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct ResizeSender(Sender<ResizeEvent>);

impl ResizeSender {
    /// Queue a resize. Returns `false` once the loop has been dropped.
    pub fn send(&self, event: ResizeEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

/// Receiving half, owned by the render loop.
#[derive(Debug)]
pub struct ResizeReceiver(Receiver<ResizeEvent>);

impl ResizeReceiver {
    /// Drain every queued event and return the most recent one.
    ///
    /// Earlier events are superseded: each applied resize fully rebuilds the
    /// surface configuration and depth texture.
    pub fn drain_latest(&self) -> Option<ResizeEvent> {
        self.0.try_iter().last()
    }
}

/// Create a connected resize sender/receiver pair.
pub fn resize_channel() -> (ResizeSender, ResizeReceiver) {
    let (tx, rx) = mpsc::channel();
    (ResizeSender(tx), ResizeReceiver(rx))
}

/// Shared cancellation flag checked before every frame is scheduled.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// A fresh, un-raised signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop before its next frame.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_floors_scaled_dimensions() {
        let event = ResizeEvent::logical(801.7, 600.2, 1.5);
        assert_eq!(event.pixel_size(), SurfaceSize::new(1202, 900));
    }

    #[test]
    fn physical_events_keep_exact_pixels() {
        // Odd sizes at fractional densities, where dividing by the density
        // and flooring the product again can drop a pixel.
        for (w, h) in [(29, 41), (1001, 767), (1366, 2561)] {
            let event = ResizeEvent::physical(w, h);
            assert_eq!(event.pixel_size(), SurfaceSize::new(w, h));
        }
    }

    #[test]
    fn invalid_ratio_falls_back_to_one() {
        assert_eq!(
            SurfaceSize::from_logical(640.0, 480.0, 0.0),
            SurfaceSize::new(640, 480)
        );
        assert_eq!(
            SurfaceSize::from_logical(640.0, 480.0, f64::NAN),
            SurfaceSize::new(640, 480)
        );
    }

    #[test]
    fn empty_sizes() {
        assert!(SurfaceSize::new(0, 10).is_empty());
        assert!(SurfaceSize::from_logical(0.4, 10.0, 2.0).is_empty());
        assert_eq!(SurfaceSize::new(0, 0).non_zero(), SurfaceSize::new(1, 1));
    }

    #[test]
    fn drain_keeps_only_latest_event() {
        let (tx, rx) = resize_channel();
        assert_eq!(rx.drain_latest(), None);
        for w in [100.0, 200.0, 300.0] {
            assert!(tx.send(ResizeEvent::logical(w, 50.0, 2.0)));
        }
        let latest = rx.drain_latest().unwrap();
        assert_eq!(latest.pixel_size(), SurfaceSize::new(600, 100));
        assert_eq!(rx.drain_latest(), None);
    }

    #[test]
    fn sender_reports_dropped_receiver() {
        let (tx, rx) = resize_channel();
        drop(rx);
        assert!(!tx.send(ResizeEvent::physical(1, 1)));
    }

    #[test]
    fn stop_signal_is_shared_between_clones() {
        let stop = StopSignal::new();
        let host_copy = stop.clone();
        assert!(!stop.is_stopped());
        host_copy.request_stop();
        assert!(stop.is_stopped());
    }
}
