//! Loading and validating the solids shader program.
//!
//! The WGSL source is parsed and validated with naga on the CPU before any
//! GPU object exists, so a missing or broken asset fails initialization
//! cleanly instead of surfacing later as a device error. The validated IR is
//! handed to wgpu directly, skipping a second parse.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// The shader shipped with the crate.
pub const EMBEDDED_SOURCE: &str =
    include_str!("../../assets/shaders/platonic_solids.wgsl");

/// Vertex entry point for spheres.
pub const VS_SPHERE: &str = "vs_sphere";
/// Vertex entry point for cylinders.
pub const VS_CYLINDER: &str = "vs_cylinder";
/// Fragment entry point shared by both pipelines.
pub const FS_MAIN: &str = "fs_main";

/// Half the view-space depth span, centered on each solid's own center,
/// that the fragment stage maps onto the near-to-far gradient. Mirrors the
/// `GRADIENT_HALF_DEPTH` constant in the embedded WGSL.
pub const GRADIENT_HALF_DEPTH: f32 = 1.0;

const REQUIRED_ENTRY_POINTS: [(&str, naga::ShaderStage); 3] = [
    (VS_SPHERE, naga::ShaderStage::Vertex),
    (VS_CYLINDER, naga::ShaderStage::Vertex),
    (FS_MAIN, naga::ShaderStage::Fragment),
];

/// Errors raised while loading the shader program.
#[derive(Debug)]
pub enum ShaderError {
    /// The shader file could not be read.
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// WGSL parse failure (rendered diagnostic).
    Parse(String),
    /// IR validation failure.
    Validation(String),
    /// A required entry point is absent or has the wrong stage.
    MissingEntryPoint(&'static str),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read shader {}: {source}", path.display())
            }
            Self::Parse(msg) => write!(f, "shader parse error: {msg}"),
            Self::Validation(msg) => {
                write!(f, "shader validation error: {msg}")
            }
            Self::MissingEntryPoint(name) => {
                write!(f, "shader is missing entry point `{name}`")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A parsed, validated shader program.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    label: String,
    module: naga::Module,
}

impl ShaderProgram {
    /// The shader compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if the embedded source fails validation.
    pub fn embedded() -> Result<Self, ShaderError> {
        Self::from_wgsl("platonic_solids.wgsl", EMBEDDED_SOURCE)
    }

    /// Read and validate a WGSL file.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Io`] if the file cannot be read, or a parse,
    /// validation, or entry-point error.
    pub fn load(path: &Path) -> Result<Self, ShaderError> {
        let source =
            std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_wgsl(&path.display().to_string(), &source)
    }

    /// Read `path` if given, otherwise use the embedded program.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load) and [`embedded`](Self::embedded).
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, ShaderError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    /// Parse and validate WGSL source.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] on parse or validation failure, or when one of
    /// `vs_sphere`, `vs_cylinder`, `fs_main` is missing.
    pub fn from_wgsl(label: &str, source: &str) -> Result<Self, ShaderError> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| ShaderError::Parse(e.emit_to_string(source)))?;

        let _info = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .map_err(|e| ShaderError::Validation(e.as_inner().to_string()))?;

        for (name, stage) in REQUIRED_ENTRY_POINTS {
            let present = module
                .entry_points
                .iter()
                .any(|ep| ep.name == name && ep.stage == stage);
            if !present {
                return Err(ShaderError::MissingEntryPoint(name));
            }
        }

        log::debug!(
            "shader {label}: {} entry points validated",
            module.entry_points.len()
        );
        Ok(Self {
            label: label.to_owned(),
            module,
        })
    }

    /// Label used for the GPU shader module.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Create the wgpu shader module from the validated IR.
    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(self.module.clone())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_shader_validates() {
        let program = ShaderProgram::embedded().unwrap();
        assert_eq!(program.label(), "platonic_solids.wgsl");
    }

    #[test]
    fn gradient_span_matches_embedded_source() {
        let program = ShaderProgram::embedded().unwrap();
        let value = program
            .module
            .constants
            .iter()
            .find(|(_, c)| c.name.as_deref() == Some("GRADIENT_HALF_DEPTH"))
            .map(|(_, c)| &program.module.global_expressions[c.init]);
        match value {
            Some(naga::Expression::Literal(naga::Literal::F32(v))) => {
                assert_eq!(*v, GRADIENT_HALF_DEPTH);
            }
            other => panic!("unexpected GRADIENT_HALF_DEPTH: {other:?}"),
        }
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err =
            ShaderProgram::from_wgsl("broken", "fn vs_sphere( {").unwrap_err();
        assert!(matches!(err, ShaderError::Parse(_)), "{err}");
    }

    #[test]
    fn missing_entry_point_is_reported() {
        let source = EMBEDDED_SOURCE.replace("fn vs_cylinder", "fn vs_tube");
        let err = ShaderProgram::from_wgsl("renamed", &source).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::MissingEntryPoint(name) if name == VS_CYLINDER
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ShaderProgram::load(Path::new("does/not/exist.wgsl"))
            .unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn load_reads_shader_from_disk() {
        let path = std::env::temp_dir().join("platonic_shader_load_test.wgsl");
        std::fs::write(&path, EMBEDDED_SOURCE).unwrap();
        let program = ShaderProgram::load_or_embedded(Some(&path)).unwrap();
        assert!(program.label().ends_with("platonic_shader_load_test.wgsl"));
        let _ = std::fs::remove_file(&path);
    }
}
