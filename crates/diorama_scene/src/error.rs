//! Scene errors

use thiserror::Error;

use diorama_assets::AssetError;
use diorama_core::{Guid, RegistryError};

/// Errors from scene construction and serialization
#[derive(Debug, Error)]
pub enum SceneError {
    /// Object already has a component of this concrete type
    #[error("Object '{object}' already has a {tag} component")]
    DuplicateComponent {
        /// Name of the object
        object: String,
        /// Tag of the rejected component
        tag: &'static str,
    },

    /// Light list is at capacity
    #[error("Scene already holds {0} lights")]
    TooManyLights(usize),

    /// Active camera must be a scene object carrying a Camera component
    #[error("Camera object not in scene: {0}")]
    CameraNotInScene(Guid),

    /// Document shape failure
    #[error("Malformed scene document: {0}")]
    Document(String),

    /// Failed to serialize to a document
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failed to rebuild from a document
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// File I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry failure
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Resource resolution failure
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}
