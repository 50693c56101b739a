//! Scene orchestration
//!
//! A scene is an insertion-ordered collection of game objects plus
//! scene-level lights and the active camera reference. It drives the
//! component lifecycle (awake exactly once, then per-tick updates),
//! round-trips to documents, and snapshots itself around play mode so
//! gameplay mutations revert on exit.

use std::any::TypeId;
use std::fs;
use std::path::Path;

use diorama_assets::manifest::write_replace;
use diorama_assets::ResourceStore;
use diorama_core::{Guid, Tagged};

use crate::builtin::Camera;
use crate::component::{Component, ComponentHandle, ComponentRegistry, SharedComponent, UpdateCtx};
use crate::document::{ComponentDocument, ObjectDocument, SceneDocument};
use crate::error::SceneError;
use crate::game_object::GameObject;
use crate::light::Light;
use crate::transform::Transform;

/// Upper bound on scene lights
pub const MAX_LIGHTS: usize = 8;

/// Authoring or simulating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    /// Authoring; updates do not run
    Edit,
    /// Simulating; updates run every tick
    Play,
}

/// A scene of game objects
pub struct Scene {
    objects: Vec<GameObject>,
    lights: Vec<Light>,
    camera: Option<Guid>,
    mode: SceneMode,
    snapshot: Option<SceneDocument>,
}

impl Scene {
    /// Create an empty scene in edit mode
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera: None,
            mode: SceneMode::Edit,
            snapshot: None,
        }
    }

    /// Append a new named object and get mutable access to it
    pub fn create_object(&mut self, name: impl Into<String>) -> &mut GameObject {
        let object = GameObject::new(name);
        log::debug!("Created object '{}' ({})", object.name(), object.guid());
        let index = self.objects.len();
        self.objects.push(object);
        &mut self.objects[index]
    }

    /// Objects in scene order
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// First object with a name, if any
    ///
    /// Names carry no uniqueness guarantee; guids do.
    pub fn find_by_name(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|object| object.name() == name)
    }

    /// Mutable lookup by name
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.name() == name)
    }

    /// Look up an object by guid
    pub fn find(&self, guid: Guid) -> Option<&GameObject> {
        self.objects.iter().find(|object| object.guid() == guid)
    }

    /// Mutable lookup by guid
    pub fn find_mut(&mut self, guid: Guid) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.guid() == guid)
    }

    /// Remove an object, dropping its slots
    ///
    /// Handles held elsewhere keep their components alive. Removing the
    /// active camera's object clears the camera reference.
    pub fn remove(&mut self, guid: Guid) -> bool {
        let before = self.objects.len();
        self.objects.retain(|object| object.guid() != guid);
        let removed = self.objects.len() != before;
        if removed && self.camera == Some(guid) {
            self.camera = None;
        }
        removed
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add a scene light
    ///
    /// The light list is bounded; an add past [`MAX_LIGHTS`] is rejected.
    pub fn add_light(&mut self, light: Light) -> Result<(), SceneError> {
        if self.lights.len() >= MAX_LIGHTS {
            log::warn!("Light rejected, scene already holds {}", MAX_LIGHTS);
            return Err(SceneError::TooManyLights(MAX_LIGHTS));
        }
        self.lights.push(light);
        Ok(())
    }

    /// Scene lights
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Remove every light
    pub fn clear_lights(&mut self) {
        self.lights.clear();
    }

    /// Set or clear the active camera
    ///
    /// The guid must name a scene object carrying a [`Camera`] component.
    pub fn set_active_camera(&mut self, guid: Option<Guid>) -> Result<(), SceneError> {
        if let Some(guid) = guid {
            let object = self.find(guid).ok_or(SceneError::CameraNotInScene(guid))?;
            if !object.has::<Camera>() {
                return Err(SceneError::CameraNotInScene(guid));
            }
        }
        self.camera = guid;
        Ok(())
    }

    /// Guid of the object holding the active camera
    pub fn active_camera(&self) -> Option<Guid> {
        self.camera
    }

    /// Resolve the active camera to its object and component
    ///
    /// Absent when no camera is set or its object has been removed since.
    pub fn resolve_active_camera(&self) -> Option<(&GameObject, ComponentHandle<Camera>)> {
        let guid = self.camera?;
        let object = self.find(guid)?;
        let handle = object.get::<Camera>()?;
        Some((object, handle))
    }

    /// Current mode
    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Check if the scene is simulating
    pub fn is_playing(&self) -> bool {
        self.mode == SceneMode::Play
    }

    /// Run pending awakes
    ///
    /// Each component is awakened exactly once, objects in scene order
    /// and components in attach order. The component sees its owner with
    /// all siblings attached.
    pub fn awake(&mut self) {
        for index in 0..self.objects.len() {
            self.awake_object(index);
        }
    }

    fn awake_object(&mut self, index: usize) {
        for slot_index in 0..self.objects[index].slots.len() {
            if self.objects[index].slots[slot_index].awakened {
                continue;
            }
            self.objects[index].slots[slot_index].awakened = true;
            let component = self.objects[index].slots[slot_index].component.clone();
            component.write().awake(&self.objects[index]);
        }
    }

    /// Advance the simulation one tick
    ///
    /// Runs only in play mode. Components still pending awake are
    /// awakened first, so one attached mid-play sees its awake before its
    /// first update.
    pub fn update(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "negative frame delta: {}", dt);
        if self.mode != SceneMode::Play {
            return;
        }
        self.awake();
        for object in &mut self.objects {
            let owner = object.guid();
            let components: Vec<SharedComponent> = object
                .slots
                .iter()
                .map(|slot| slot.component.clone())
                .collect();
            for component in components {
                let mut ctx = UpdateCtx {
                    dt,
                    owner,
                    transform: &mut object.transform,
                };
                component.write().update(&mut ctx);
            }
        }
    }

    /// Visit every component of exactly `T` across the scene
    ///
    /// Objects in scene order. Enumerating a type that was never
    /// registered is a programming error, caught in debug builds.
    pub fn each<T, F>(&self, registry: &ComponentRegistry, mut visitor: F)
    where
        T: Component + Tagged,
        F: FnMut(&GameObject, &T),
    {
        debug_assert!(
            registry.contains_type(TypeId::of::<T>()),
            "enumerating unregistered component type: {}",
            T::TAG
        );
        let type_id = TypeId::of::<T>();
        for object in &self.objects {
            for slot in &object.slots {
                if slot.type_id != type_id {
                    continue;
                }
                let guard = slot.component.read();
                if let Some(typed) = guard.as_any().downcast_ref::<T>() {
                    visitor(object, typed);
                }
            }
        }
    }

    /// Serialize to a complete document
    pub fn to_document(&self) -> Result<SceneDocument, SceneError> {
        let mut objects = Vec::with_capacity(self.objects.len());
        for object in &self.objects {
            let (position, rotation, scale) = object.transform().to_arrays();
            let mut components = Vec::with_capacity(object.slots.len());
            for slot in &object.slots {
                let payload = slot.component.read().to_document()?;
                components.push(ComponentDocument {
                    type_tag: slot.tag.to_string(),
                    payload,
                });
            }
            objects.push(ObjectDocument {
                guid: object.guid(),
                name: object.name().to_string(),
                position,
                rotation,
                scale,
                components,
            });
        }
        Ok(SceneDocument {
            objects,
            lights: self.lights.clone(),
            camera: Guid::encode_ref(self.camera),
        })
    }

    /// Build a scene from a document
    ///
    /// All-or-nothing: any malformed entry fails the whole build, so a
    /// caller's existing scene stays untouched on failure. The result is
    /// in edit mode with every component pending awake.
    pub fn from_document(
        document: &SceneDocument,
        registry: &ComponentRegistry,
        store: &ResourceStore,
    ) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        for object_doc in &document.objects {
            let mut object = GameObject::with_guid(object_doc.guid, object_doc.name.clone());
            object.transform = Transform::from_arrays(
                object_doc.position,
                object_doc.rotation,
                object_doc.scale,
            );
            for component_doc in &object_doc.components {
                let (tag, type_id) = registry.meta(&component_doc.type_tag).ok_or_else(|| {
                    SceneError::Document(format!(
                        "unknown component type: {}",
                        component_doc.type_tag
                    ))
                })?;
                let component =
                    registry.create_from_document(tag, &component_doc.payload, store)?;
                object.add_slot(tag, type_id, component)?;
            }
            scene.objects.push(object);
        }
        scene.lights = document.lights.clone();
        let camera = Guid::decode_ref(&document.camera)
            .map_err(|e| SceneError::Document(e.to_string()))?;
        scene.set_active_camera(camera)?;
        Ok(scene)
    }

    /// Save to a JSON file
    ///
    /// The document is written beside the target and renamed over it, so
    /// a failed save leaves any previous file intact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let document = self.to_document()?;
        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| SceneError::Serialization(e.to_string()))?;
        write_replace(path, &bytes)?;
        log::info!(
            "Saved scene with {} objects to {}",
            document.objects.len(),
            path.display()
        );
        Ok(())
    }

    /// Load from a JSON file
    ///
    /// Builds a complete new scene; on any failure the caller's existing
    /// scene remains valid.
    pub fn load(
        path: impl AsRef<Path>,
        registry: &ComponentRegistry,
        store: &ResourceStore,
    ) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let document: SceneDocument = serde_json::from_slice(&bytes)
            .map_err(|e| SceneError::Deserialization(e.to_string()))?;
        let scene = Self::from_document(&document, registry, store)?;
        log::info!(
            "Loaded scene with {} objects from {}",
            scene.objects.len(),
            path.display()
        );
        Ok(scene)
    }

    /// Enter play mode, snapshotting the current state
    ///
    /// Idempotent: entering while already playing keeps the original
    /// snapshot, so the eventual exit reverts to the true entry state.
    pub fn enter_play(&mut self) -> Result<(), SceneError> {
        if self.mode == SceneMode::Play {
            return Ok(());
        }
        self.snapshot = Some(self.to_document()?);
        self.mode = SceneMode::Play;
        log::info!("Entered play mode");
        Ok(())
    }

    /// Exit play mode, reverting to the entry snapshot
    ///
    /// Live state is discarded: the scene rebuilds from the play-entry
    /// document and awakes again, so every gameplay mutation reverts.
    /// Exiting while not playing is a no-op.
    pub fn exit_play(
        &mut self,
        registry: &ComponentRegistry,
        store: &ResourceStore,
    ) -> Result<(), SceneError> {
        if self.mode != SceneMode::Play {
            return Ok(());
        }
        let snapshot = match self.snapshot.take() {
            Some(snapshot) => snapshot,
            None => {
                self.mode = SceneMode::Edit;
                return Ok(());
            }
        };
        let mut restored = match Self::from_document(&snapshot, registry, store) {
            Ok(scene) => scene,
            Err(err) => {
                // Keep the snapshot so a later exit can still revert
                self.snapshot = Some(snapshot);
                return Err(err);
            }
        };
        restored.awake();
        *self = restored;
        log::info!("Exited play mode, reverted to entry snapshot");
        Ok(())
    }

    /// The document captured on play entry, while playing
    pub fn play_snapshot(&self) -> Option<&SceneDocument> {
        self.snapshot.as_ref()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .field("lights", &self.lights.len())
            .field("camera", &self.camera)
            .field("mode", &self.mode)
            .finish()
    }
}
