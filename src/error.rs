//! Crate-level error types.

use std::fmt;

use crate::geometry::MeshError;
use crate::gpu::render_context::RenderContextError;
use crate::gpu::shader::ShaderError;

/// Errors produced by the platonic crate.
#[derive(Debug)]
pub enum PlatonicError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Shader program could not be loaded or validated.
    Shader(ShaderError),
    /// Primitive mesh generation rejected its parameters.
    Mesh(MeshError),
    /// The device reported an out-of-memory error while allocating buffers.
    Allocation(String),
    /// The device rejected a render pipeline.
    Pipeline(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but hold unusable values.
    InvalidOptions(String),
    /// No host container to render into.
    MissingContainer,
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for PlatonicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(e) => write!(f, "{e}"),
            Self::Mesh(e) => write!(f, "mesh error: {e}"),
            Self::Allocation(msg) => {
                write!(f, "GPU allocation failed: {msg}")
            }
            Self::Pipeline(msg) => {
                write!(f, "render pipeline creation failed: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::MissingContainer => write!(f, "no container to render into"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for PlatonicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Shader(e) => Some(e),
            Self::Mesh(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for PlatonicError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ShaderError> for PlatonicError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<MeshError> for PlatonicError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<std::io::Error> for PlatonicError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
