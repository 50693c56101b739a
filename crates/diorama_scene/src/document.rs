//! Scene document types
//!
//! The document is the full-fidelity serialized form of a scene. Objects
//! keep their guids, every component carries a "type" field naming its
//! registered kind, and references are guid strings with the literal
//! "null" for intentionally absent ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use diorama_core::{Guid, NULL_REF};

use crate::light::Light;

/// One serialized component: its registered tag plus own state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDocument {
    /// Registered type tag
    #[serde(rename = "type")]
    pub type_tag: String,
    /// The component's own payload fields
    #[serde(flatten)]
    pub payload: Value,
}

/// One serialized object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDocument {
    /// Stable object guid
    pub guid: Guid,
    /// Object name
    pub name: String,
    /// World position
    pub position: [f32; 3],
    /// World rotation quaternion (x, y, z, w)
    pub rotation: [f32; 4],
    /// World scale per axis
    pub scale: [f32; 3],
    /// Components in attach order
    pub components: Vec<ComponentDocument>,
}

/// A complete serialized scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Objects in scene order
    pub objects: Vec<ObjectDocument>,
    /// Scene lights
    pub lights: Vec<Light>,
    /// Guid of the object holding the active camera, or "null"
    pub camera: String,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera: NULL_REF.to_string(),
        }
    }
}
