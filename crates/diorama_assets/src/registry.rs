//! Resource type registration

use std::any::TypeId;
use std::sync::Arc;

use serde_json::Value;

use diorama_core::{RegistryError, TypeRegistry};

use crate::resource::{DecodeResource, Resource};

/// Registry of resource kinds keyed by manifest tag
///
/// Kinds register at startup; the set stays open so projects can add
/// their own resource types without touching the loader.
pub struct ResourceRegistry {
    inner: TypeRegistry<Arc<dyn Resource>>,
}

impl ResourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: TypeRegistry::new(),
        }
    }

    /// Register a resource kind under its tag
    pub fn register<T>(&mut self) -> Result<(), RegistryError>
    where
        T: DecodeResource,
    {
        self.inner.register_with(
            T::TAG,
            TypeId::of::<T>(),
            || Arc::new(T::default()) as Arc<dyn Resource>,
            |doc, _| {
                let resource =
                    T::from_document(doc).map_err(|e| RegistryError::decode(T::TAG, e))?;
                Ok(Arc::new(resource) as Arc<dyn Resource>)
            },
        )
    }

    /// Create a default-initialized instance from a tag
    pub fn create(&self, tag: &str) -> Result<Arc<dyn Resource>, RegistryError> {
        self.inner.create(tag)
    }

    /// Rebuild an instance from its manifest payload
    pub fn create_from_document(
        &self,
        tag: &str,
        doc: &Value,
    ) -> Result<Arc<dyn Resource>, RegistryError> {
        self.inner.create_from_document(tag, doc, &())
    }

    /// Tag and TypeId recorded under `tag`
    pub fn meta(&self, tag: &str) -> Option<(&'static str, TypeId)> {
        self.inner.meta(tag)
    }

    /// Check if a tag is registered
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.inner.contains_tag(tag)
    }

    /// Check if a concrete type is registered
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.inner.contains_type(type_id)
    }

    /// Registered tags in registration order
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.tags()
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if no kinds are registered
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{register_builtin_kinds, Mesh};

    #[test]
    fn test_builtin_kinds_register_once() {
        let mut registry = ResourceRegistry::new();
        register_builtin_kinds(&mut registry).unwrap();
        assert_eq!(registry.len(), 3);
        let tags: Vec<_> = registry.tags().collect();
        assert_eq!(tags, vec!["Mesh", "Material", "Shader"]);

        // Registering the same kind again is rejected
        assert!(matches!(
            registry.register::<Mesh>(),
            Err(RegistryError::DuplicateTag(_))
        ));
    }

    #[test]
    fn test_create_default_by_tag() {
        let mut registry = ResourceRegistry::new();
        register_builtin_kinds(&mut registry).unwrap();
        let resource = registry.create("Mesh").unwrap();
        assert_eq!(resource.type_tag(), "Mesh");
    }

    #[test]
    fn test_create_from_document_decodes_payload() {
        let mut registry = ResourceRegistry::new();
        register_builtin_kinds(&mut registry).unwrap();
        let doc = serde_json::json!({
            "label": "tri",
            "vertices": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            "indices": [0, 1, 2],
        });
        let resource = registry.create_from_document("Mesh", &doc).unwrap();
        let mesh = resource.as_any().downcast_ref::<Mesh>().unwrap();
        assert_eq!(mesh.label, "tri");
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_untyped_resource_debug_carries_the_tag() {
        let mut registry = ResourceRegistry::new();
        register_builtin_kinds(&mut registry).unwrap();
        let resource = registry.create("Material").unwrap();
        let formatted = format!("{:?}", resource);
        assert!(formatted.contains("Resource"));
        assert!(formatted.contains("Material"));
    }

    #[test]
    fn test_create_from_document_wraps_decode_failure() {
        let mut registry = ResourceRegistry::new();
        register_builtin_kinds(&mut registry).unwrap();
        let doc = serde_json::json!({ "vertices": "not-an-array" });
        let err = registry.create_from_document("Mesh", &doc).unwrap_err();
        assert!(matches!(err, RegistryError::Decode { .. }));
    }
}
