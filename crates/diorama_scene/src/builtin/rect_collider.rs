//! Trigger rect marker component

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use diorama_assets::ResourceStore;
use diorama_core::Tagged;

use crate::component::{Component, DecodeComponent};
use crate::error::SceneError;

/// Extent of the trigger rect registered for this object
///
/// The runtime scans colliders when a scene is installed and registers
/// one rect per collider with the trigger engine; the rect then follows
/// the owner's world position every poll. The component itself holds no
/// overlap state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectCollider {
    /// Rect extent along +x
    pub width: f32,
    /// Rect extent along +y
    pub height: f32,
}

impl Default for RectCollider {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl RectCollider {
    /// Create with an extent
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Tagged for RectCollider {
    const TAG: &'static str = "RectCollider";
}

impl Component for RectCollider {
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

impl DecodeComponent for RectCollider {
    fn from_document(doc: &Value, _store: &ResourceStore) -> Result<Self, SceneError> {
        serde_json::from_value(doc.clone())
            .map_err(|e| SceneError::Deserialization(e.to_string()))
    }
}
