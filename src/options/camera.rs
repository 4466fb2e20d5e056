use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Fixed camera: perspective projection looking down -Z from `distance`.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Distance from the camera to the row of solids.
    pub distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            distance: 8.0,
        }
    }
}

impl CameraOptions {
    /// Vertical field of view in radians.
    #[must_use]
    pub fn fovy_radians(&self) -> f32 {
        self.fovy.to_radians()
    }
}
