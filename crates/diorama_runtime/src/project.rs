//! Project round-trips and play mode

use std::fs;

use diorama_assets::{load_manifest, save_manifest, ManifestStats};
use diorama_scene::Scene;

use crate::context::AppContext;
use crate::error::RuntimeError;

impl AppContext {
    /// Save the project: resource manifest, then scene
    ///
    /// Each file is written beside its target and renamed over it, so a
    /// failed save never corrupts a previous file.
    pub fn save_project(&self) -> Result<(), RuntimeError> {
        fs::create_dir_all(&self.config.project_dir)?;
        save_manifest(&self.store, self.config.manifest_path())?;
        self.scene.save(self.config.scene_path())?;
        log::info!("Project saved to {}", self.config.project_dir.display());
        Ok(())
    }

    /// Load the project: resource manifest before scene
    ///
    /// The scene references resources by guid, so the manifest must land
    /// first. The new scene is installed only once both files parsed; a
    /// failed load leaves the previous scene and store usable.
    pub fn load_project(&mut self) -> Result<ManifestStats, RuntimeError> {
        let stats = load_manifest(&self.store, &self.resources, self.config.manifest_path())?;
        let scene = Scene::load(self.config.scene_path(), &self.components, &self.store)?;
        self.set_scene(scene);
        log::info!("Project loaded from {}", self.config.project_dir.display());
        Ok(stats)
    }

    /// Enter play mode and run pending awakes
    pub fn enter_play(&mut self) -> Result<(), RuntimeError> {
        self.scene.enter_play()?;
        self.scene.awake();
        Ok(())
    }

    /// Exit play mode, reverting the scene and rewiring triggers
    ///
    /// The reverted scene may have different colliders than the played
    /// one, so the trigger engine is rebuilt from scratch.
    pub fn exit_play(&mut self) -> Result<(), RuntimeError> {
        self.scene.exit_play(&self.components, &self.store)?;
        self.last_events.clear();
        self.rebuild_triggers();
        Ok(())
    }
}
