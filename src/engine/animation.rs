//! Fixed per-solid motion and the per-frame uniform computation.
//!
//! Every solid spins about its own axis at its own constant speed. Axes are
//! drawn once from the seeded generator, in solid index order, so a given
//! seed always produces the same scene.

use glam::Vec3;
use web_time::Instant;

use crate::gpu::instances::SolidUniform;
use crate::math::lcg::Lcg;
use crate::math::transform::{self, Mat4};
use crate::options::{CameraOptions, ColorOptions, SceneOptions};

/// Rotation axis, angular speed, and placement of one solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidMotion {
    /// Unit rotation axis.
    pub axis: Vec3,
    /// Radians per second.
    pub speed: f32,
    /// World-space center.
    pub position: Vec3,
}

impl SolidMotion {
    /// Rotation angle after `elapsed` seconds.
    pub fn angle(&self, elapsed: f32) -> f32 {
        elapsed * self.speed
    }

    /// `translate(position) · rotate(axis, angle)`.
    pub fn model_matrix(&self, elapsed: f32) -> Mat4 {
        let p = self.position;
        transform::multiply(
            &transform::translate(p.x, p.y, p.z),
            &transform::rotate_axis_angle(self.axis, self.angle(elapsed)),
        )
    }
}

/// View and projection for the fixed camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    /// World to view.
    pub view: Mat4,
    /// View to clip, depth in `[0, 1]`.
    pub projection: Mat4,
}

impl CameraMatrices {
    /// Camera on +Z at `camera.distance`, looking at the origin.
    pub fn new(camera: &CameraOptions, aspect: f32) -> Self {
        Self {
            view: transform::translate(0.0, 0.0, -camera.distance),
            projection: transform::perspective(
                camera.fovy_radians(),
                aspect,
                camera.znear,
                camera.zfar,
            ),
        }
    }
}

/// Motion of every solid, fixed at init.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    motions: Vec<SolidMotion>,
}

impl AnimationState {
    /// Sample one axis per solid from `rng`, in index order.
    ///
    /// Solids are centered on the origin along X, `scene.spacing` apart.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(rng: &mut Lcg, count: usize, scene: &SceneOptions) -> Self {
        let middle = count.saturating_sub(1) as f32 / 2.0;
        let motions = (0..count)
            .map(|i| SolidMotion {
                axis: rng.unit_vector(),
                speed: scene.speed(i),
                position: Vec3::new(
                    (i as f32 - middle) * scene.spacing,
                    0.0,
                    0.0,
                ),
            })
            .collect();
        Self { motions }
    }

    /// Per-solid motion, in solid index order.
    pub fn motions(&self) -> &[SolidMotion] {
        &self.motions
    }

    /// Uniform blocks for every solid at `elapsed` seconds.
    pub fn frame_uniforms(
        &self,
        elapsed: f32,
        camera: &CameraMatrices,
        colors: &ColorOptions,
    ) -> Vec<SolidUniform> {
        let near_color = colors.near_rgba();
        let far_color = colors.far_rgba();
        self.motions
            .iter()
            .map(|motion| {
                let model_view = transform::multiply(
                    &camera.view,
                    &motion.model_matrix(elapsed),
                );
                SolidUniform {
                    mvp: transform::multiply(&camera.projection, &model_view),
                    model_view,
                    near_color,
                    far_color,
                }
            })
            .collect()
    }
}

/// Seconds since the animation started.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    start: Instant,
}

impl AnimationClock {
    /// Start counting now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed seconds.
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
