//! Read-only seams for renderer collaborators

use std::sync::Arc;

use glam::Mat4;

use diorama_assets::{Material, Mesh};
use diorama_scene::{Light, MeshRenderer};

use crate::context::AppContext;

impl AppContext {
    /// Visit every renderable in scene order
    ///
    /// A renderable is a mesh renderer that resolved its mesh; one with
    /// no mesh is skipped, one with no material is passed as such. The
    /// visitor receives the owner's world matrix. The context itself
    /// issues no graphics calls.
    pub fn visit_renderables<F>(&self, mut visitor: F)
    where
        F: FnMut(Mat4, &Arc<Mesh>, Option<&Arc<Material>>),
    {
        self.scene
            .each::<MeshRenderer, _>(&self.components, |object, renderer| {
                if let Some(mesh) = renderer.mesh() {
                    visitor(object.world_matrix(), mesh, renderer.material());
                }
            });
    }

    /// Scene lights, bounded by the scene's light cap
    pub fn lights(&self) -> &[Light] {
        self.scene.lights()
    }

    /// View and projection matrices of the active camera
    ///
    /// Absent when no camera is set or its object has been removed.
    pub fn camera_matrices(&self, aspect: f32) -> Option<(Mat4, Mat4)> {
        let (object, camera) = self.scene.resolve_active_camera()?;
        let view = object.world_matrix().inverse();
        let projection = camera.read().projection_matrix(aspect);
        Some((view, projection))
    }
}
