use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the WGSL program comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShaderOptions {
    /// WGSL file to load instead of the embedded program.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
