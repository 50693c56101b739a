//! Resource trait family

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use diorama_core::Tagged;

use crate::error::AssetError;

/// A heavyweight shared asset
///
/// Resources are immutable once constructed; holders share them through
/// `Arc` and compare them by guid, not by content. `to_document`
/// serializes own state only, since resources never reference each
/// other.
pub trait Resource: Any + Send + Sync {
    /// Stable tag written into manifests
    fn type_tag(&self) -> &'static str;

    /// Serialize own state to a document payload
    ///
    /// The payload must be a JSON object so manifest entries can carry it
    /// alongside the guid and tag.
    fn to_document(&self) -> Result<Value, AssetError>;

    /// Get as Any reference (for downcasting)
    fn as_any(&self) -> &dyn Any;

    /// Convert the shared reference for typed downcasting
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl std::fmt::Debug for dyn Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("type_tag", &self.type_tag())
            .finish()
    }
}

/// Resources reconstructible from a manifest payload
pub trait DecodeResource: Resource + Tagged + Default {
    /// Rebuild from a document payload
    fn from_document(doc: &Value) -> Result<Self, AssetError>;
}
