//! Renderer options with TOML file support.
//!
//! Every tunable constant of the scene (layout, motion, tessellation,
//! camera, palette, frame cap, shader source) lives here. The defaults
//! reproduce the stock scene exactly, and every section uses
//! `#[serde(default)]` so a TOML file only needs the values it changes.

mod camera;
mod colors;
mod frame;
mod scene;
mod shader;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use frame::FrameOptions;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};
pub use shader::ShaderOptions;

use crate::error::PlatonicError;
use crate::geometry::MIN_SEGMENTS;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Solid layout, rotation speeds, and mesh tessellation.
    pub scene: SceneOptions,
    /// Projection and camera placement.
    pub camera: CameraOptions,
    /// Background and depth-gradient colors.
    pub colors: ColorOptions,
    /// Frame pacing.
    pub frame: FrameOptions,
    /// Shader program source.
    pub shader: ShaderOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PlatonicError::Io`] if the file cannot be read or
    /// [`PlatonicError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, PlatonicError> {
        let content = std::fs::read_to_string(path).map_err(PlatonicError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PlatonicError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, PlatonicError> {
        toml::from_str(content)
            .map_err(|e| PlatonicError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`PlatonicError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), PlatonicError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PlatonicError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PlatonicError::Io)?;
        }
        std::fs::write(path, content).map_err(PlatonicError::Io)
    }

    /// Reject values the renderer cannot work with.
    ///
    /// Mesh sizes above the 16-bit index limit are caught later by the
    /// generators themselves.
    ///
    /// # Errors
    ///
    /// Returns [`PlatonicError::InvalidOptions`] naming the first bad field.
    pub fn validate(&self) -> Result<(), PlatonicError> {
        let invalid = |msg: String| Err(PlatonicError::InvalidOptions(msg));
        let scene = &self.scene;
        let camera = &self.camera;

        if scene.sphere_segments < MIN_SEGMENTS {
            return invalid(format!(
                "scene.sphere_segments must be at least {MIN_SEGMENTS}"
            ));
        }
        if scene.cylinder_segments < MIN_SEGMENTS {
            return invalid(format!(
                "scene.cylinder_segments must be at least {MIN_SEGMENTS}"
            ));
        }
        if ![scene.spacing, scene.base_speed, scene.speed_step]
            .iter()
            .all(|v| v.is_finite())
        {
            return invalid("scene values must be finite".to_owned());
        }
        if !(camera.fovy > 0.0 && camera.fovy < 180.0) {
            return invalid(
                "camera.fovy must be in (0, 180) degrees".to_owned(),
            );
        }
        if !(camera.znear > 0.0 && camera.zfar > camera.znear) {
            return invalid(
                "camera planes must satisfy 0 < znear < zfar".to_owned(),
            );
        }
        if !camera.distance.is_finite() {
            return invalid("camera.distance must be finite".to_owned());
        }
        if !self
            .colors
            .components()
            .all(|c| (0.0..=1.0).contains(&c))
        {
            return invalid("color components must lie in [0, 1]".to_owned());
        }
        Ok(())
    }
}
