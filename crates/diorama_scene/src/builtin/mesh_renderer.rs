//! Mesh rendering component

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use diorama_assets::{AssetError, Material, Mesh, ResourceStore};
use diorama_core::{Guid, Tagged};

use crate::component::{Component, DecodeComponent};
use crate::error::SceneError;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeshRendererDocument {
    mesh: String,
    material: String,
}

/// Attaches shared mesh and material resources to an object
///
/// The component holds references; the renderer collaborator walks them
/// through the context seam and issues the draw calls. Resources are
/// shared, so two renderers pointing at one mesh see the same instance.
/// Either reference may be absent.
#[derive(Debug, Default)]
pub struct MeshRenderer {
    mesh: Option<Arc<Mesh>>,
    material: Option<Arc<Material>>,
    mesh_guid: Option<Guid>,
    material_guid: Option<Guid>,
}

impl MeshRenderer {
    /// Create with no resources assigned
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the mesh
    pub fn set_mesh(&mut self, guid: Guid, mesh: Arc<Mesh>) {
        self.mesh_guid = Some(guid);
        self.mesh = Some(mesh);
    }

    /// Assign the material
    pub fn set_material(&mut self, guid: Guid, material: Arc<Material>) {
        self.material_guid = Some(guid);
        self.material = Some(material);
    }

    /// Set the mesh (builder pattern)
    pub fn with_mesh(mut self, guid: Guid, mesh: Arc<Mesh>) -> Self {
        self.set_mesh(guid, mesh);
        self
    }

    /// Set the material (builder pattern)
    pub fn with_material(mut self, guid: Guid, material: Arc<Material>) -> Self {
        self.set_material(guid, material);
        self
    }

    /// The shared mesh, if assigned
    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    /// The shared material, if assigned
    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    /// Guid of the assigned mesh
    pub fn mesh_guid(&self) -> Option<Guid> {
        self.mesh_guid
    }

    /// Guid of the assigned material
    pub fn material_guid(&self) -> Option<Guid> {
        self.material_guid
    }
}

impl Tagged for MeshRenderer {
    const TAG: &'static str = "MeshRenderer";
}

impl Component for MeshRenderer {
    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn to_document(&self) -> Result<Value, SceneError> {
        let doc = MeshRendererDocument {
            mesh: Guid::encode_ref(self.mesh_guid),
            material: Guid::encode_ref(self.material_guid),
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

impl DecodeComponent for MeshRenderer {
    fn from_document(doc: &Value, store: &ResourceStore) -> Result<Self, SceneError> {
        let doc: MeshRendererDocument = serde_json::from_value(doc.clone())
            .map_err(|e| SceneError::Deserialization(e.to_string()))?;
        let mut renderer = Self::new();
        if let Some(guid) = Guid::decode_ref(&doc.mesh).map_err(AssetError::from)? {
            let mesh = store.get::<Mesh>(guid).ok_or(AssetError::NotFound(guid))?;
            renderer.set_mesh(guid, mesh);
        }
        if let Some(guid) = Guid::decode_ref(&doc.material).map_err(AssetError::from)? {
            let material = store
                .get::<Material>(guid)
                .ok_or(AssetError::NotFound(guid))?;
            renderer.set_material(guid, material);
        }
        Ok(renderer)
    }
}
