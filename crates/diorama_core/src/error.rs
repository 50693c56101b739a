//! Error types for identity and registration

use thiserror::Error;

/// Errors from the type registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Tag is already registered
    #[error("Tag already registered: {0}")]
    DuplicateTag(String),

    /// Concrete type is already registered under another tag
    #[error("Type already registered, second tag was: {0}")]
    DuplicateType(String),

    /// Tag is not registered
    #[error("Unknown type tag: {0}")]
    UnknownTag(String),

    /// A from-document factory rejected its payload
    #[error("Failed to decode '{tag}': {message}")]
    Decode {
        /// Tag of the type being decoded
        tag: String,
        /// Factory failure description
        message: String,
    },
}

impl RegistryError {
    /// Wrap a factory failure together with its tag
    pub fn decode(tag: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            tag: tag.into(),
            message: message.to_string(),
        }
    }
}

/// Errors from guid parsing
#[derive(Debug, Error)]
pub enum GuidError {
    /// String is neither the null reference nor a well-formed guid
    #[error("Malformed guid reference: {0}")]
    Malformed(String),
}
