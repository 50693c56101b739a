//! Guid-indexed resource storage

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use diorama_core::{Guid, Tagged};

use crate::error::AssetError;
use crate::registry::ResourceRegistry;
use crate::resource::Resource;

struct StoreEntry {
    guid: Guid,
    tag: &'static str,
    resource: Arc<dyn Resource>,
}

#[derive(Default)]
struct StoreIndex {
    entries: Vec<StoreEntry>,
    by_guid: HashMap<Guid, usize>,
}

/// Storage for every loaded resource
///
/// The store holds exactly one instance per guid; holders share it
/// through `Arc`, so two lookups of the same guid see the same object.
/// Entries keep insertion order, which fixes manifest output and
/// enumeration order. All methods take `&self`; the index lives behind a
/// read-write lock.
pub struct ResourceStore {
    index: RwLock<StoreIndex>,
}

impl ResourceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            index: RwLock::new(StoreIndex::default()),
        }
    }

    /// Store a resource under a fresh guid
    pub fn create<T: Resource>(&self, resource: T) -> (Guid, Arc<T>) {
        let guid = Guid::new();
        let shared = Arc::new(resource);
        let tag = shared.type_tag();
        let mut index = self.index.write();
        let slot = index.entries.len();
        index.entries.push(StoreEntry {
            guid,
            tag,
            resource: shared.clone(),
        });
        index.by_guid.insert(guid, slot);
        log::debug!("Created {} resource {}", tag, guid);
        (guid, shared)
    }

    /// Store an already-shared resource under a known guid
    ///
    /// This is the manifest load path; identity comes from the document,
    /// so a guid collision is rejected rather than resolved.
    pub fn insert_with(
        &self,
        guid: Guid,
        tag: &'static str,
        resource: Arc<dyn Resource>,
    ) -> Result<(), AssetError> {
        let mut index = self.index.write();
        if index.by_guid.contains_key(&guid) {
            return Err(AssetError::DuplicateGuid(guid));
        }
        let slot = index.entries.len();
        index.entries.push(StoreEntry { guid, tag, resource });
        index.by_guid.insert(guid, slot);
        Ok(())
    }

    /// Get a typed shared reference
    ///
    /// Absent both when the guid is unknown and when it is stored under a
    /// different type; the caller decides how severe absence is.
    pub fn get<T: Resource>(&self, guid: Guid) -> Option<Arc<T>> {
        let resource = self.get_untyped(guid)?;
        resource.as_any_arc().downcast::<T>().ok()
    }

    /// Get an untyped shared reference
    pub fn get_untyped(&self, guid: Guid) -> Option<Arc<dyn Resource>> {
        let index = self.index.read();
        index
            .by_guid
            .get(&guid)
            .map(|&slot| index.entries[slot].resource.clone())
    }

    /// Tag recorded for a guid
    pub fn tag_of(&self, guid: Guid) -> Option<&'static str> {
        let index = self.index.read();
        index.by_guid.get(&guid).map(|&slot| index.entries[slot].tag)
    }

    /// Resolve a document reference string to a typed resource
    ///
    /// The literal `"null"` is an intentionally absent reference and
    /// resolves to `Ok(None)`. A malformed string or a guid the store
    /// does not hold under `T` is an error; a dangling reference in a
    /// document is corruption, not a soft miss.
    pub fn resolve_ref<T: Resource>(
        &self,
        reference: &str,
    ) -> Result<Option<Arc<T>>, AssetError> {
        let guid = match Guid::decode_ref(reference)? {
            Some(guid) => guid,
            None => return Ok(None),
        };
        self.get::<T>(guid)
            .map(Some)
            .ok_or(AssetError::NotFound(guid))
    }

    /// Visit every resource of exactly `T` in insertion order
    ///
    /// Enumerating a type that was never registered is a programming
    /// error, caught in debug builds.
    pub fn each<T, F>(&self, registry: &ResourceRegistry, mut visitor: F)
    where
        T: Resource + Tagged,
        F: FnMut(Guid, &Arc<T>),
    {
        debug_assert!(
            registry.contains_type(TypeId::of::<T>()),
            "enumerating unregistered resource type: {}",
            T::TAG
        );
        let snapshot: Vec<(Guid, Arc<dyn Resource>)> = {
            let index = self.index.read();
            index
                .entries
                .iter()
                .map(|entry| (entry.guid, entry.resource.clone()))
                .collect()
        };
        for (guid, resource) in snapshot {
            if let Ok(typed) = resource.as_any_arc().downcast::<T>() {
                visitor(guid, &typed);
            }
        }
    }

    /// Check if a guid is present
    pub fn contains(&self, guid: Guid) -> bool {
        self.index.read().by_guid.contains_key(&guid)
    }

    /// Guids in insertion order
    pub fn guids(&self) -> Vec<Guid> {
        self.index.read().entries.iter().map(|entry| entry.guid).collect()
    }

    /// Remove a resource from the store
    ///
    /// Holders keep their shared references alive; removal only stops new
    /// lookups from finding it.
    pub fn remove(&self, guid: Guid) -> bool {
        let mut index = self.index.write();
        let slot = match index.by_guid.remove(&guid) {
            Some(slot) => slot,
            None => return false,
        };
        index.entries.remove(slot);
        for entry_slot in index.by_guid.values_mut() {
            if *entry_slot > slot {
                *entry_slot -= 1;
            }
        }
        true
    }

    /// Remove every resource
    pub fn clear(&self) {
        let mut index = self.index.write();
        index.entries.clear();
        index.by_guid.clear();
    }

    /// Number of stored resources
    pub fn len(&self) -> usize {
        self.index.read().entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.index.read().entries.is_empty()
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}
