//! Camera component

use std::any::Any;

use glam::Mat4;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use diorama_assets::ResourceStore;
use diorama_core::Tagged;

use crate::component::{Component, DecodeComponent};
use crate::error::SceneError;

/// Camera projection mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Perspective projection with a vertical field of view in degrees
    Perspective {
        /// Vertical field of view in degrees
        fov_y_degrees: f32,
    },
    /// Orthographic projection; width follows the viewport aspect ratio
    Orthographic {
        /// View height in world units
        height: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective {
            fov_y_degrees: 60.0,
        }
    }
}

/// Rendering viewpoint carried by a scene object
///
/// The view matrix comes from the owner's transform; the component holds
/// projection parameters only. Which camera renders is a scene-level
/// choice, not a property of the component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Projection mode
    pub projection: Projection,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a perspective camera
    pub fn perspective(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            projection: Projection::Perspective { fov_y_degrees },
            near,
            far,
        }
    }

    /// Create an orthographic camera
    pub fn orthographic(height: f32, near: f32, far: f32) -> Self {
        Self {
            projection: Projection::Orthographic { height },
            near,
            far,
        }
    }

    /// Projection matrix for a viewport aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov_y_degrees } => {
                Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect, self.near, self.far)
            }
            Projection::Orthographic { height } => {
                let half_height = height * 0.5;
                let half_width = half_height * aspect;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }
}

impl Tagged for Camera {
    const TAG: &'static str = "Camera";
}

impl Component for Camera {
    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn to_document(&self) -> Result<Value, SceneError> {
        serde_json::to_value(self).map_err(|e| SceneError::Serialization(e.to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl DecodeComponent for Camera {
    fn from_document(doc: &Value, _store: &ResourceStore) -> Result<Self, SceneError> {
        serde_json::from_value(doc.clone())
            .map_err(|e| SceneError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sixty_degree_perspective() {
        let camera = Camera::default();
        assert_eq!(
            camera.projection,
            Projection::Perspective {
                fov_y_degrees: 60.0
            }
        );
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_perspective_matrix_is_finite() {
        let camera = Camera::perspective(60.0, 0.1, 100.0);
        let matrix = camera.projection_matrix(16.0 / 9.0);
        assert!(matrix.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_orthographic_matrix_maps_height() {
        let camera = Camera::orthographic(2.0, 0.1, 10.0);
        let matrix = camera.projection_matrix(1.0);
        // Top of the view volume lands on y = 1 in clip space
        let top = matrix.project_point3(glam::Vec3::new(0.0, 1.0, -1.0));
        assert!((top.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_document_round_trip() {
        let camera = Camera::orthographic(5.0, 0.5, 50.0);
        let doc = camera.to_document().unwrap();
        let store = ResourceStore::new();
        let back = Camera::from_document(&doc, &store).unwrap();
        assert_eq!(camera, back);
    }
}
