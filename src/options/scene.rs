use serde::{Deserialize, Serialize};

use crate::math::lcg::DEFAULT_SEED;

/// Layout, motion, and tessellation of the row of solids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Distance between neighbouring solid centers along X.
    pub spacing: f32,
    /// Angular speed of solid 0, in radians per second.
    pub base_speed: f32,
    /// Extra angular speed per solid index.
    pub speed_step: f32,
    /// Seed for the rotation-axis generator.
    pub seed: u32,
    /// Latitude/longitude bands of the vertex spheres.
    pub sphere_segments: u32,
    /// Radial segments of the edge cylinders.
    pub cylinder_segments: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            spacing: 2.5,
            base_speed: 0.5,
            speed_step: 0.1,
            seed: DEFAULT_SEED,
            sphere_segments: 10,
            cylinder_segments: 8,
        }
    }
}

impl SceneOptions {
    /// Angular speed of solid `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn speed(&self, index: usize) -> f32 {
        self.base_speed + self.speed_step * index as f32
    }
}
