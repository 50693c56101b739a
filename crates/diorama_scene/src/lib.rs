//! Diorama Scene - Game Objects With Polymorphic Components
//!
//! This crate provides the scene model: named objects carrying an open
//! set of components, serialized to full-fidelity JSON documents.
//!
//! # Features
//!
//! - Game objects with guid identity, a transform, and typed components
//! - A component lifecycle: awake exactly once, then per-tick updates
//! - Scene-level lights and an active camera reference
//! - Document round-trips that rebuild an equivalent scene
//! - A play-mode snapshot so gameplay mutations revert on exit
//!
//! # Example
//!
//! ```ignore
//! use diorama_scene::prelude::*;
//!
//! let mut scene = Scene::new();
//! let ball = scene.create_object("Ball");
//! ball.add(Spinner::new(45.0))?;
//! scene.enter_play()?;
//! scene.update(1.0 / 60.0);
//! ```

pub mod builtin;
pub mod component;
pub mod document;
pub mod error;
pub mod game_object;
pub mod light;
pub mod scene;
pub mod transform;

pub mod prelude {
    pub use crate::builtin::{
        register_builtins, Camera, MeshRenderer, Projection, RectCollider, Spinner,
    };
    pub use crate::component::{
        Component, ComponentHandle, ComponentRegistry, DecodeComponent, SharedComponent,
        TriggerHit, UpdateCtx,
    };
    pub use crate::document::{ComponentDocument, ObjectDocument, SceneDocument};
    pub use crate::error::SceneError;
    pub use crate::game_object::GameObject;
    pub use crate::light::Light;
    pub use crate::scene::{Scene, SceneMode, MAX_LIGHTS};
    pub use crate::transform::Transform;
}

pub use prelude::*;
