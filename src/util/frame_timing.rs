//! Frame pacing and a smoothed frames-per-second estimate.

use web_time::{Duration, Instant};

/// Weight of the newest sample in the FPS moving average.
const FPS_SMOOTHING: f32 = 0.05;

/// Optional frame cap plus an exponentially smoothed FPS counter.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Shortest allowed gap between frames (zero = uncapped).
    min_frame_duration: Duration,
    last_frame: Instant,
    smoothed_fps: f32,
    frames: u64,
}

impl FrameTiming {
    /// Create a frame timer with the given FPS cap (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            frames: 0,
        }
    }

    /// Whether enough time has passed since the last frame to draw another.
    pub fn should_render(&self) -> bool {
        self.min_frame_duration.is_zero()
            || self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Record a finished frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;

        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - FPS_SMOOTHING)
                + FPS_SMOOTHING / frame_time;
        }
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames recorded so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
