//! Application context

use std::path::PathBuf;

use diorama_assets::{register_builtin_kinds, ResourceRegistry, ResourceStore};
use diorama_scene::{register_builtins, ComponentRegistry, Scene};
use diorama_triggers::{TriggerEngine, TriggerEvent};

use crate::error::RuntimeError;

/// Configuration for the runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory holding the project files
    pub project_dir: PathBuf,
    /// Resource manifest file name inside the project directory
    pub manifest_file: String,
    /// Scene file name inside the project directory
    pub scene_file: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            manifest_file: "manifest.json".to_string(),
            scene_file: "scene.json".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Configuration rooted at a project directory
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            ..Default::default()
        }
    }

    /// Set the manifest file name (builder pattern)
    pub fn with_manifest_file(mut self, name: impl Into<String>) -> Self {
        self.manifest_file = name.into();
        self
    }

    /// Set the scene file name (builder pattern)
    pub fn with_scene_file(mut self, name: impl Into<String>) -> Self {
        self.scene_file = name.into();
        self
    }

    /// Full path of the manifest file
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join(&self.manifest_file)
    }

    /// Full path of the scene file
    pub fn scene_path(&self) -> PathBuf {
        self.project_dir.join(&self.scene_file)
    }
}

/// The application context
///
/// Owns every piece of live state: both registries, the resource store,
/// the scene, and the trigger engine. All operations against the
/// context are valid between `init` and `shutdown`; dropping the
/// context is the hard end of its world.
pub struct AppContext {
    pub(crate) config: RuntimeConfig,
    /// Component kinds by tag
    pub(crate) components: ComponentRegistry,
    /// Resource kinds by tag
    pub(crate) resources: ResourceRegistry,
    /// Shared resources by guid
    pub(crate) store: ResourceStore,
    /// The live scene
    pub(crate) scene: Scene,
    /// Collision rects and overlap tracking
    pub(crate) triggers: TriggerEngine,
    /// Current frame number
    pub(crate) frame: u64,
    /// Trigger events from the most recent poll
    pub(crate) last_events: Vec<TriggerEvent>,
}

impl AppContext {
    /// Boot a context with every built-in kind registered
    pub fn init(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let mut components = ComponentRegistry::new();
        register_builtins(&mut components)?;
        let mut resources = ResourceRegistry::new();
        register_builtin_kinds(&mut resources)?;
        log::info!(
            "Runtime up: {} component kinds, {} resource kinds, project {}",
            components.len(),
            resources.len(),
            config.project_dir.display()
        );
        Ok(Self {
            config,
            components,
            resources,
            store: ResourceStore::new(),
            scene: Scene::new(),
            triggers: TriggerEngine::new(),
            frame: 0,
            last_events: Vec::new(),
        })
    }

    /// The active configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Get the component registry
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Get mutable component registry
    pub fn components_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.components
    }

    /// Get the resource registry
    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Get mutable resource registry
    pub fn resources_mut(&mut self) -> &mut ResourceRegistry {
        &mut self.resources
    }

    /// Get the resource store
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Get the scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get mutable scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Get the trigger engine
    pub fn triggers(&self) -> &TriggerEngine {
        &self.triggers
    }

    /// Get mutable trigger engine
    ///
    /// Consumers clear per-rect entered latches through this.
    pub fn triggers_mut(&mut self) -> &mut TriggerEngine {
        &mut self.triggers
    }

    /// Get current frame number
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Install a scene and wire its colliders into the trigger engine
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.last_events.clear();
        self.rebuild_triggers();
    }

    /// Shut the context down
    pub fn shutdown(self) {
        log::info!("Runtime down after {} frames", self.frame);
    }
}
