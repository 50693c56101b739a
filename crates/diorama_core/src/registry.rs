//! Tag-indexed type registry
//!
//! Documents name types by string tag. The registry maps each tag to a
//! pair of factories so loaders can build instances without knowing the
//! concrete types at compile time, and the set of registered kinds stays
//! open for extension.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::error::RegistryError;

/// Types registrable under a stable tag
pub trait Tagged {
    /// Tag written into documents; renaming it breaks existing files
    const TAG: &'static str;
}

type DefaultFn<P> = Box<dyn Fn() -> P + Send + Sync>;
type DecodeFn<P, C> = Box<dyn Fn(&Value, &C) -> Result<P, RegistryError> + Send + Sync>;

struct Entry<P, C> {
    tag: &'static str,
    type_id: TypeId,
    default_fn: DefaultFn<P>,
    decode_fn: DecodeFn<P, C>,
}

/// Registry mapping string tags to construction factories
///
/// `P` is the product handed back by the factories and `C` the context
/// passed to from-document factories. Entries keep registration order so
/// enumeration is deterministic. Each tag and each concrete type may be
/// registered at most once.
pub struct TypeRegistry<P, C = ()> {
    entries: Vec<Entry<P, C>>,
    by_tag: HashMap<&'static str, usize>,
    by_type: HashMap<TypeId, usize>,
}

impl<P, C> TypeRegistry<P, C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_tag: HashMap::new(),
            by_type: HashMap::new(),
        }
    }

    /// Register a type under its tag with both factories
    pub fn register_with(
        &mut self,
        tag: &'static str,
        type_id: TypeId,
        default_fn: impl Fn() -> P + Send + Sync + 'static,
        decode_fn: impl Fn(&Value, &C) -> Result<P, RegistryError> + Send + Sync + 'static,
    ) -> Result<(), RegistryError> {
        if self.by_tag.contains_key(tag) {
            return Err(RegistryError::DuplicateTag(tag.to_string()));
        }
        if self.by_type.contains_key(&type_id) {
            return Err(RegistryError::DuplicateType(tag.to_string()));
        }
        let index = self.entries.len();
        self.entries.push(Entry {
            tag,
            type_id,
            default_fn: Box::new(default_fn),
            decode_fn: Box::new(decode_fn),
        });
        self.by_tag.insert(tag, index);
        self.by_type.insert(type_id, index);
        log::debug!("Registered type '{}'", tag);
        Ok(())
    }

    /// Create a default-initialized instance from a tag
    pub fn create(&self, tag: &str) -> Result<P, RegistryError> {
        let entry = self.entry_by_tag(tag)?;
        Ok((entry.default_fn)())
    }

    /// Create an instance from its document payload
    pub fn create_from_document(
        &self,
        tag: &str,
        doc: &Value,
        ctx: &C,
    ) -> Result<P, RegistryError> {
        let entry = self.entry_by_tag(tag)?;
        (entry.decode_fn)(doc, ctx)
    }

    /// Tag and TypeId recorded under `tag`
    ///
    /// The returned tag is the registered `'static` spelling, which
    /// outlives any document string the caller looked it up with.
    pub fn meta(&self, tag: &str) -> Option<(&'static str, TypeId)> {
        self.by_tag.get(tag).map(|&index| {
            let entry = &self.entries[index];
            (entry.tag, entry.type_id)
        })
    }

    /// Tag registered for a concrete type, if any
    pub fn tag_of(&self, type_id: TypeId) -> Option<&'static str> {
        self.by_type.get(&type_id).map(|&index| self.entries[index].tag)
    }

    /// Check if a tag is registered
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Check if a concrete type is registered
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.by_type.contains_key(&type_id)
    }

    /// Registered tags in registration order
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.tag)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no types are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_by_tag(&self, tag: &str) -> Result<&Entry<P, C>, RegistryError> {
        self.by_tag
            .get(tag)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| RegistryError::UnknownTag(tag.to_string()))
    }
}

impl<P, C> Default for TypeRegistry<P, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, C> fmt::Debug for TypeRegistry<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.entries.len())
            .finish()
    }
}
