//! Continuous rotation behavior

use std::any::Any;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use diorama_assets::ResourceStore;
use diorama_core::Tagged;

use crate::builtin::MeshRenderer;
use crate::component::{Component, DecodeComponent, UpdateCtx};
use crate::error::SceneError;
use crate::game_object::GameObject;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpinnerDocument {
    degrees_per_second: f32,
}

/// Spins the owner around +Y at a fixed rate
///
/// Awake looks for a sibling [`MeshRenderer`] to spin; without one the
/// spinner disables itself silently instead of failing. The enabled flag
/// is a derived cache and is not serialized.
pub struct Spinner {
    /// Spin rate around +Y in degrees per second
    pub degrees_per_second: f32,
    enabled: bool,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            degrees_per_second: 90.0,
            enabled: false,
        }
    }
}

impl Spinner {
    /// Create with a spin rate in degrees per second
    pub fn new(degrees_per_second: f32) -> Self {
        Self {
            degrees_per_second,
            enabled: false,
        }
    }

    /// Whether awake found the sibling it needs
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Tagged for Spinner {
    const TAG: &'static str = "Spinner";
}

impl Component for Spinner {
    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn awake(&mut self, owner: &GameObject) {
        self.enabled = owner.has::<MeshRenderer>();
        if !self.enabled {
            log::debug!(
                "Spinner on '{}' found no MeshRenderer sibling, disabled",
                owner.name()
            );
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        if !self.enabled {
            return;
        }
        let angle = (self.degrees_per_second * ctx.dt).to_radians();
        ctx.transform.rotation = Quat::from_axis_angle(Vec3::Y, angle) * ctx.transform.rotation;
    }

    fn to_document(&self) -> Result<Value, SceneError> {
        let doc = SpinnerDocument {
            degrees_per_second: self.degrees_per_second,
        };
        serde_json::to_value(doc).map_err(|e| SceneError::Serialization(e.to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl DecodeComponent for Spinner {
    fn from_document(doc: &Value, _store: &ResourceStore) -> Result<Self, SceneError> {
        let doc: SpinnerDocument = serde_json::from_value(doc.clone())
            .map_err(|e| SceneError::Deserialization(e.to_string()))?;
        Ok(Self::new(doc.degrees_per_second))
    }
}
