//! Asset system errors

use thiserror::Error;

use diorama_core::{Guid, GuidError, RegistryError};

/// Errors from the resource store and manifest round-trips
#[derive(Debug, Error)]
pub enum AssetError {
    /// File I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize to a document
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failed to rebuild from a document
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Reference string is neither "null" nor a well-formed guid
    #[error("Invalid resource reference: {0}")]
    InvalidRef(String),

    /// No resource stored under this guid
    #[error("Resource not found: {0}")]
    NotFound(Guid),

    /// A resource already exists under this guid
    #[error("Duplicate resource guid: {0}")]
    DuplicateGuid(Guid),

    /// Registry failure
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl From<GuidError> for AssetError {
    fn from(err: GuidError) -> Self {
        match err {
            GuidError::Malformed(s) => Self::InvalidRef(s),
        }
    }
}
