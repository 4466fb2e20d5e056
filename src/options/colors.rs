use serde::{Deserialize, Serialize};

/// Clear color and the two ends of the depth gradient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGBA clear color.
    pub background: [f32; 4],
    /// RGB color at the near end of the depth gradient.
    pub near: [f32; 3],
    /// RGB color at the far end of the depth gradient.
    pub far: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            background: [0.992, 0.965, 0.890, 1.0],
            near: [0.208, 0.655, 0.486],
            far: [0.875, 0.412, 0.729],
        }
    }
}

impl ColorOptions {
    /// Background as a render pass clear value.
    #[must_use]
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.background.map(f64::from);
        wgpu::Color { r, g, b, a }
    }

    /// Near color with opaque alpha, as uploaded to the shader.
    #[must_use]
    pub fn near_rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.near;
        [r, g, b, 1.0]
    }

    /// Far color with opaque alpha, as uploaded to the shader.
    #[must_use]
    pub fn far_rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.far;
        [r, g, b, 1.0]
    }

    pub(super) fn components(&self) -> impl Iterator<Item = f32> + '_ {
        self.background
            .iter()
            .chain(&self.near)
            .chain(&self.far)
            .copied()
    }
}
