//! Built-in component kinds

mod camera;
mod mesh_renderer;
mod rect_collider;
mod spinner;

pub use camera::{Camera, Projection};
pub use mesh_renderer::MeshRenderer;
pub use rect_collider::RectCollider;
pub use spinner::Spinner;

use diorama_core::RegistryError;

use crate::component::ComponentRegistry;

/// Register every built-in component kind
pub fn register_builtins(registry: &mut ComponentRegistry) -> Result<(), RegistryError> {
    registry.register::<MeshRenderer>()?;
    registry.register::<Camera>()?;
    registry.register::<RectCollider>()?;
    registry.register::<Spinner>()?;
    Ok(())
}
