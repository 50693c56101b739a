//! Diorama Assets - Shared Resources With Stable Identity
//!
//! Resources are heavyweight immutable assets (meshes, materials,
//! shaders) stored once and shared by guid.
//!
//! # Features
//!
//! - A guid-indexed store holding exactly one instance per resource
//! - Typed lookups that treat a type mismatch as absence
//! - Reference resolution with an explicit "null" form
//! - Manifest round-trips that never duplicate or re-identify a resource
//!
//! # Example
//!
//! ```ignore
//! use diorama_assets::prelude::*;
//!
//! let store = ResourceStore::new();
//! let (guid, mesh) = store.create(Mesh::quad(1.0));
//! let again = store.get::<Mesh>(guid).unwrap();
//! assert!(Arc::ptr_eq(&mesh, &again));
//! ```

pub mod error;
pub mod kinds;
pub mod manifest;
pub mod registry;
pub mod resource;
pub mod store;

pub mod prelude {
    pub use crate::error::AssetError;
    pub use crate::kinds::{register_builtin_kinds, Material, Mesh, Shader};
    pub use crate::manifest::{
        load_manifest, save_manifest, ManifestDocument, ManifestEntry, ManifestStats,
    };
    pub use crate::registry::ResourceRegistry;
    pub use crate::resource::{DecodeResource, Resource};
    pub use crate::store::ResourceStore;
}

pub use prelude::*;
