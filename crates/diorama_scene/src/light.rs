//! Scene lights

use serde::{Deserialize, Serialize};

/// Point light in world space
///
/// Lights are scene-level state rather than components; the renderer
/// reads the list through the context seam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// World position
    pub position: [f32; 3],
    /// Linear RGB color
    pub color: [f32; 3],
    /// Influence radius in world units
    pub range: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            color: [1.0, 1.0, 1.0],
            range: 10.0,
        }
    }
}

impl Light {
    /// Create a white light at a position
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the color (builder pattern)
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Set the range (builder pattern)
    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }
}
