use serde::{Deserialize, Serialize};

/// Frame pacing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FrameOptions {
    /// Frame cap in frames per second (0 = follow the display).
    pub target_fps: u32,
}
