//! Game objects and their component slots

use std::any::TypeId;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use parking_lot::RwLock;

use diorama_core::{Guid, Tagged};

use crate::component::{Component, ComponentHandle, SharedComponent};
use crate::error::SceneError;
use crate::transform::Transform;

pub(crate) struct ComponentSlot {
    pub(crate) tag: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) awakened: bool,
    pub(crate) component: SharedComponent,
}

/// A named scene object carrying components
///
/// At most one component of each concrete type may be attached, and
/// slots keep attach order. The object owns its slots; handles share
/// them, so a handle stays valid while anyone holds it even after the
/// object is removed from the scene.
pub struct GameObject {
    guid: Guid,
    name: String,
    pub(crate) transform: Transform,
    pub(crate) slots: Vec<ComponentSlot>,
}

impl GameObject {
    /// Create a named object with a fresh guid
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            guid: Guid::new(),
            name: name.into(),
            transform: Transform::IDENTITY,
            slots: Vec::new(),
        }
    }

    /// Create with a known guid (document load path)
    pub(crate) fn with_guid(guid: Guid, name: impl Into<String>) -> Self {
        Self {
            guid,
            name: name.into(),
            transform: Transform::IDENTITY,
            slots: Vec::new(),
        }
    }

    /// The object's guid
    pub fn guid(&self) -> Guid {
        self.guid
    }

    /// The object's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the object; names carry no uniqueness guarantee
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Attach a component and get a typed handle to it
    ///
    /// A second component of the same concrete type is rejected so
    /// sibling lookups stay unambiguous.
    pub fn add<T>(&mut self, component: T) -> Result<ComponentHandle<T>, SceneError>
    where
        T: Component + Tagged,
    {
        let type_id = TypeId::of::<T>();
        if self.slots.iter().any(|slot| slot.type_id == type_id) {
            return Err(SceneError::DuplicateComponent {
                object: self.name.clone(),
                tag: T::TAG,
            });
        }
        let shared: SharedComponent = Arc::new(RwLock::new(component));
        self.slots.push(ComponentSlot {
            tag: T::TAG,
            type_id,
            awakened: false,
            component: shared.clone(),
        });
        log::debug!("Attached {} to '{}'", T::TAG, self.name);
        Ok(ComponentHandle::from_slot(shared))
    }

    /// Attach an already-shared component under its registered tag
    pub(crate) fn add_slot(
        &mut self,
        tag: &'static str,
        type_id: TypeId,
        component: SharedComponent,
    ) -> Result<(), SceneError> {
        if self.slots.iter().any(|slot| slot.type_id == type_id) {
            return Err(SceneError::DuplicateComponent {
                object: self.name.clone(),
                tag,
            });
        }
        self.slots.push(ComponentSlot {
            tag,
            type_id,
            awakened: false,
            component,
        });
        Ok(())
    }

    /// Get a typed handle to an attached component
    pub fn get<T>(&self) -> Option<ComponentHandle<T>>
    where
        T: Component,
    {
        let type_id = TypeId::of::<T>();
        self.slots
            .iter()
            .find(|slot| slot.type_id == type_id)
            .map(|slot| ComponentHandle::from_slot(slot.component.clone()))
    }

    /// Check whether a component type is attached
    pub fn has<T: Component>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.slots.iter().any(|slot| slot.type_id == type_id)
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.slots.len()
    }

    /// Attached component tags in attach order
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|slot| slot.tag)
    }

    /// Shared slots in attach order, for dispatch seams
    pub fn components(&self) -> Vec<SharedComponent> {
        self.slots.iter().map(|slot| slot.component.clone()).collect()
    }

    /// The object's transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Set the world position
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Set the world rotation
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    /// Set the world scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// World matrix, composed on demand
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    /// Orient the object's forward axis at a target point
    pub fn look_at(&mut self, target: Vec3) {
        self.transform.look_at(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{Camera, RectCollider, Spinner};

    #[test]
    fn test_fresh_objects_have_distinct_guids() {
        let a = GameObject::new("A");
        let b = GameObject::new("B");
        assert_ne!(a.guid(), b.guid());
        assert_eq!(a.name(), "A");
    }

    #[test]
    fn test_add_and_get() {
        let mut object = GameObject::new("Ball");
        object.add(Spinner::new(45.0)).unwrap();
        object.add(RectCollider::new(1.0, 1.0)).unwrap();

        assert_eq!(object.component_count(), 2);
        assert!(object.has::<Spinner>());
        assert!(!object.has::<Camera>());

        let spinner = object.get::<Spinner>().unwrap();
        assert_eq!(spinner.read().degrees_per_second, 45.0);
        assert!(object.get::<Camera>().is_none());
    }

    #[test]
    fn test_duplicate_component_rejected() {
        let mut object = GameObject::new("Ball");
        object.add(Spinner::new(45.0)).unwrap();
        let err = object.add(Spinner::new(90.0)).unwrap_err();
        assert!(matches!(
            err,
            SceneError::DuplicateComponent { tag: "Spinner", .. }
        ));
        // The original survives untouched
        assert_eq!(object.component_count(), 1);
        let spinner = object.get::<Spinner>().unwrap();
        assert_eq!(spinner.read().degrees_per_second, 45.0);
    }

    #[test]
    fn test_tags_keep_attach_order() {
        let mut object = GameObject::new("Ball");
        object.add(RectCollider::new(1.0, 1.0)).unwrap();
        object.add(Spinner::new(45.0)).unwrap();
        let tags: Vec<_> = object.tags().collect();
        assert_eq!(tags, vec!["RectCollider", "Spinner"]);
    }

    #[test]
    fn test_handle_outlives_membership() {
        let mut object = GameObject::new("Ball");
        let handle = object.add(Spinner::new(45.0)).unwrap();
        drop(object);
        assert_eq!(handle.read().degrees_per_second, 45.0);
    }

    #[test]
    fn test_transform_setters() {
        let mut object = GameObject::new("Ball");
        object.set_position(Vec3::new(1.0, 2.0, 3.0));
        object.set_scale(Vec3::splat(2.0));
        assert_eq!(object.transform().position, Vec3::new(1.0, 2.0, 3.0));

        let moved = object.world_matrix().transform_point3(Vec3::ZERO);
        assert_eq!(moved, Vec3::new(1.0, 2.0, 3.0));
    }
}
