//! Diorama Runtime - Application Context And Frame Driver
//!
//! This crate ties the scene, resource store, and trigger engine
//! together under one explicit context, created by `init` and ended by
//! `shutdown`. A single cooperative thread drives everything: each tick
//! updates the scene, polls the trigger engine, and dispatches overlap
//! transitions to the components on both sides.
//!
//! # Features
//!
//! - An application context owning registries, store, scene, and triggers
//! - A per-tick driver with trigger polling and callback dispatch
//! - Project save/load: manifest before scene, write-then-replace files
//! - Play mode wrappers that rewire colliders across the revert
//! - Read-only visitation seams for renderer collaborators
//!
//! # Example
//!
//! ```ignore
//! use diorama_runtime::prelude::*;
//!
//! let mut app = AppContext::init(RuntimeConfig::new("project"))?;
//! app.load_project()?;
//! app.enter_play()?;
//! app.tick(1.0 / 60.0);
//! for event in app.take_trigger_events() {
//!     println!("{:?}", event.kind);
//! }
//! app.shutdown();
//! ```

pub mod context;
pub mod error;

mod frame;
mod project;
mod visit;

pub mod prelude {
    pub use crate::context::{AppContext, RuntimeConfig};
    pub use crate::error::RuntimeError;
}

pub use prelude::*;
