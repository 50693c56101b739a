//! Built-in resource kinds

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use diorama_core::{RegistryError, Tagged};

use crate::error::AssetError;
use crate::registry::ResourceRegistry;
use crate::resource::{DecodeResource, Resource};

/// Triangle mesh geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Authoring label
    pub label: String,
    /// Vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a named empty mesh
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Axis-aligned square in the XY plane, centered at the origin
    pub fn quad(size: f32) -> Self {
        let half = size * 0.5;
        Self {
            label: "quad".to_string(),
            vertices: vec![
                [-half, -half, 0.0],
                [half, -half, 0.0],
                [half, half, 0.0],
                [-half, half, 0.0],
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Tagged for Mesh {
    const TAG: &'static str = "Mesh";
}

impl Resource for Mesh {
    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn to_document(&self) -> Result<Value, AssetError> {
        serde_json::to_value(self).map_err(|e| AssetError::Serialization(e.to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl DecodeResource for Mesh {
    fn from_document(doc: &Value) -> Result<Self, AssetError> {
        serde_json::from_value(doc.clone())
            .map_err(|e| AssetError::Deserialization(e.to_string()))
    }
}

/// Surface appearance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Authoring label
    pub label: String,
    /// Base color as linear RGBA
    pub base_color: [f32; 4],
    /// Metallic factor in [0, 1]
    pub metallic: f32,
    /// Roughness factor in [0, 1]
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            label: String::new(),
            base_color: [1.0, 1.0, 1.0, 1.0],
            metallic: 0.0,
            roughness: 0.5,
        }
    }
}

impl Material {
    /// Create a named material with default parameters
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the base color (builder pattern)
    pub fn with_base_color(mut self, base_color: [f32; 4]) -> Self {
        self.base_color = base_color;
        self
    }

    /// Set the metallic factor (builder pattern)
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic;
        self
    }

    /// Set the roughness factor (builder pattern)
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }
}

impl Tagged for Material {
    const TAG: &'static str = "Material";
}

impl Resource for Material {
    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn to_document(&self) -> Result<Value, AssetError> {
        serde_json::to_value(self).map_err(|e| AssetError::Serialization(e.to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl DecodeResource for Material {
    fn from_document(doc: &Value) -> Result<Self, AssetError> {
        serde_json::from_value(doc.clone())
            .map_err(|e| AssetError::Deserialization(e.to_string()))
    }
}

/// Shader source code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shader {
    /// Authoring label
    pub label: String,
    /// Source text
    pub source: String,
}

impl Shader {
    /// Create a named shader from source text
    pub fn new(label: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
        }
    }
}

impl Tagged for Shader {
    const TAG: &'static str = "Shader";
}

impl Resource for Shader {
    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn to_document(&self) -> Result<Value, AssetError> {
        serde_json::to_value(self).map_err(|e| AssetError::Serialization(e.to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl DecodeResource for Shader {
    fn from_document(doc: &Value) -> Result<Self, AssetError> {
        serde_json::from_value(doc.clone())
            .map_err(|e| AssetError::Deserialization(e.to_string()))
    }
}

/// Register every built-in resource kind
pub fn register_builtin_kinds(registry: &mut ResourceRegistry) -> Result<(), RegistryError> {
    registry.register::<Mesh>()?;
    registry.register::<Material>()?;
    registry.register::<Shader>()?;
    Ok(())
}
