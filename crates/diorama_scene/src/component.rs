//! Component trait family, registry, and typed handles

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use serde_json::Value;

use diorama_assets::ResourceStore;
use diorama_core::{Guid, RegistryError, Tagged, TypeRegistry};
use diorama_triggers::CollisionRect;

use crate::error::SceneError;
use crate::game_object::GameObject;
use crate::transform::Transform;

/// Per-tick context handed to component updates
///
/// The owner's transform is split out of the object so a component can
/// move its owner without aliasing the slot list it is stored in.
pub struct UpdateCtx<'a> {
    /// Seconds since the previous tick
    pub dt: f32,
    /// Guid of the owning object
    pub owner: Guid,
    /// Transform of the owning object
    pub transform: &'a mut Transform,
}

/// The other side of a trigger transition, delivered to a component
#[derive(Debug, Clone)]
pub struct TriggerHit {
    /// Guid of the other object in the pair
    pub other: Guid,
    /// The other object's rect at the time of the transition
    pub other_rect: CollisionRect,
}

/// Behavior attached to a game object
///
/// Lifecycle: `awake` runs exactly once, after the owner and all sibling
/// components exist and before the first `update`. `update` runs every
/// tick while the scene is playing. Trigger callbacks fire on overlap
/// transitions of the owner's rect.
///
/// During `awake` the component's own lock is held for writing, so
/// looking up its own slot through `owner` deadlocks; awake is for
/// sibling lookups.
pub trait Component: Any + Send + Sync {
    /// Stable tag written into documents
    fn type_tag(&self) -> &'static str;

    /// One-time setup once the owner and its siblings exist
    ///
    /// A missing sibling disables the dependent behavior rather than
    /// failing; a later save must not be blocked by a half-built object.
    fn awake(&mut self, _owner: &GameObject) {}

    /// Per-tick behavior while the scene is playing
    fn update(&mut self, _ctx: &mut UpdateCtx<'_>) {}

    /// Serialize own state to a document payload
    ///
    /// The payload must be a JSON object. Resource references are encoded
    /// as guid strings; derived caches are left out and rebuilt by awake.
    fn to_document(&self) -> Result<Value, SceneError>;

    /// Called on the tick the owner's rect starts overlapping another
    fn on_trigger_enter(&mut self, _hit: &TriggerHit) {}

    /// Called on the tick the owner's rect stops overlapping another
    fn on_trigger_exit(&mut self, _hit: &TriggerHit) {}

    /// Get as Any reference (for downcasting)
    fn as_any(&self) -> &dyn Any;

    /// Get as mutable Any reference (for downcasting)
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Components reconstructible from a document payload
pub trait DecodeComponent: Component + Tagged + Default {
    /// Rebuild from a document payload, resolving resource references
    /// through the store
    fn from_document(doc: &Value, store: &ResourceStore) -> Result<Self, SceneError>;
}

/// Shared, type-erased component slot
pub type SharedComponent = Arc<RwLock<dyn Component>>;

/// Registry of component kinds keyed by document tag
pub struct ComponentRegistry {
    inner: TypeRegistry<SharedComponent, ResourceStore>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: TypeRegistry::new(),
        }
    }

    /// Register a component kind under its tag
    pub fn register<T>(&mut self) -> Result<(), RegistryError>
    where
        T: DecodeComponent,
    {
        self.inner.register_with(
            T::TAG,
            TypeId::of::<T>(),
            || Arc::new(RwLock::new(T::default())) as SharedComponent,
            |doc, store| {
                let component = T::from_document(doc, store)
                    .map_err(|e| RegistryError::decode(T::TAG, e))?;
                Ok(Arc::new(RwLock::new(component)) as SharedComponent)
            },
        )
    }

    /// Create a default-initialized instance from a tag
    pub fn create(&self, tag: &str) -> Result<SharedComponent, RegistryError> {
        self.inner.create(tag)
    }

    /// Rebuild an instance from its document payload
    pub fn create_from_document(
        &self,
        tag: &str,
        doc: &Value,
        store: &ResourceStore,
    ) -> Result<SharedComponent, RegistryError> {
        self.inner.create_from_document(tag, doc, store)
    }

    /// Tag and TypeId recorded under `tag`
    pub fn meta(&self, tag: &str) -> Option<(&'static str, TypeId)> {
        self.inner.meta(tag)
    }

    /// Check if a tag is registered
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.inner.contains_tag(tag)
    }

    /// Check if a concrete type is registered
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.inner.contains_type(type_id)
    }

    /// Registered tags in registration order
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.tags()
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if no kinds are registered
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed handle to a component slot
///
/// The handle shares the slot with the owning object. The concrete type
/// was verified when the handle was created, so guard access never
/// fails.
pub struct ComponentHandle<T: Component> {
    slot: SharedComponent,
    _marker: PhantomData<T>,
}

impl<T: Component> ComponentHandle<T> {
    /// Wrap a slot whose concrete type is known to be `T`
    pub(crate) fn from_slot(slot: SharedComponent) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    /// Lock the component for reading
    pub fn read(&self) -> MappedRwLockReadGuard<'_, T> {
        RwLockReadGuard::map(self.slot.read(), |component| {
            component
                .as_any()
                .downcast_ref::<T>()
                .expect("slot type verified when the handle was created")
        })
    }

    /// Lock the component for writing
    pub fn write(&self) -> MappedRwLockWriteGuard<'_, T> {
        RwLockWriteGuard::map(self.slot.write(), |component| {
            component
                .as_any_mut()
                .downcast_mut::<T>()
                .expect("slot type verified when the handle was created")
        })
    }

    /// The underlying shared slot
    pub fn shared(&self) -> SharedComponent {
        self.slot.clone()
    }
}

impl<T: Component> Clone for ComponentHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Component> std::fmt::Debug for ComponentHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentHandle")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
