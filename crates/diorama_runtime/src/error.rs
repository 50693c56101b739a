//! Runtime errors

use thiserror::Error;

use diorama_assets::AssetError;
use diorama_core::RegistryError;
use diorama_scene::SceneError;

/// Errors from context setup and project round-trips
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Scene failure
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Asset failure
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Registry failure
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// File I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
