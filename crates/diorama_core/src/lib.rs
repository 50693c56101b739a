//! Diorama Core - Identity and Type Registration
//!
//! This crate provides the two primitives the rest of the engine builds on.
//!
//! # Features
//!
//! - Stable 128-bit guids that survive serialization
//! - Reference encoding with an explicit "null" form for absent links
//! - A tag-indexed type registry so documents can name types the loader
//!   has never heard of at compile time
//!
//! # Example
//!
//! ```ignore
//! use diorama_core::prelude::*;
//!
//! let guid = Guid::new();
//! let reference = Guid::encode_ref(Some(guid));
//! assert_eq!(Guid::decode_ref(&reference)?, Some(guid));
//! ```

pub mod error;
pub mod guid;
pub mod registry;

pub mod prelude {
    pub use crate::error::{GuidError, RegistryError};
    pub use crate::guid::{Guid, NULL_REF};
    pub use crate::registry::{Tagged, TypeRegistry};
}

pub use prelude::*;
