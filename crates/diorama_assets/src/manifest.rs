//! Manifest round-trips for the resource store
//!
//! A manifest lists every resource with its guid, tag, and own payload.
//! Loading is additive and identity-preserving: entries whose guid is
//! already present are skipped, so the same manifest can be loaded twice
//! without duplicating anything.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use diorama_core::{Guid, RegistryError};

use crate::error::AssetError;
use crate::registry::ResourceRegistry;
use crate::store::ResourceStore;

/// One manifest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Resource guid, stable across round-trips
    pub guid: Guid,
    /// Registered type tag
    #[serde(rename = "type")]
    pub type_tag: String,
    /// The resource's own payload fields
    #[serde(flatten)]
    pub payload: Value,
}

/// Manifest document listing every stored resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestDocument {
    /// Entries in store insertion order
    pub resources: Vec<ManifestEntry>,
}

/// Counts from a manifest load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestStats {
    /// Entries constructed and inserted
    pub loaded: usize,
    /// Entries skipped because their guid was already present
    pub skipped: usize,
}

/// Serialize every stored resource to a manifest document
pub fn manifest_document(store: &ResourceStore) -> Result<ManifestDocument, AssetError> {
    let mut resources = Vec::new();
    for guid in store.guids() {
        let resource = match store.get_untyped(guid) {
            Some(resource) => resource,
            None => continue,
        };
        resources.push(ManifestEntry {
            guid,
            type_tag: resource.type_tag().to_string(),
            payload: resource.to_document()?,
        });
    }
    Ok(ManifestDocument { resources })
}

/// Save the store to a manifest file
///
/// The document goes to a temporary sibling first and is renamed over
/// the target, so a failed save leaves any previous file intact.
pub fn save_manifest(store: &ResourceStore, path: impl AsRef<Path>) -> Result<(), AssetError> {
    let path = path.as_ref();
    let document = manifest_document(store)?;
    let bytes = serde_json::to_vec_pretty(&document)
        .map_err(|e| AssetError::Serialization(e.to_string()))?;
    write_replace(path, &bytes)?;
    log::info!(
        "Saved manifest with {} resources to {}",
        document.resources.len(),
        path.display()
    );
    Ok(())
}

/// Load a manifest file into the store
pub fn load_manifest(
    store: &ResourceStore,
    registry: &ResourceRegistry,
    path: impl AsRef<Path>,
) -> Result<ManifestStats, AssetError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let document: ManifestDocument = serde_json::from_slice(&bytes)
        .map_err(|e| AssetError::Deserialization(e.to_string()))?;
    let stats = load_manifest_document(store, registry, &document)?;
    log::info!(
        "Loaded manifest from {}: {} resources, {} skipped",
        path.display(),
        stats.loaded,
        stats.skipped
    );
    Ok(stats)
}

/// Load an already-parsed manifest document into the store
///
/// All-or-nothing on malformed input: every entry is constructed before
/// anything is inserted, so a bad entry cannot leave a partial load
/// behind.
pub fn load_manifest_document(
    store: &ResourceStore,
    registry: &ResourceRegistry,
    document: &ManifestDocument,
) -> Result<ManifestStats, AssetError> {
    let mut staged = Vec::new();
    let mut stats = ManifestStats::default();
    for entry in &document.resources {
        if store.contains(entry.guid) {
            log::debug!("Skipping present resource {}", entry.guid);
            stats.skipped += 1;
            continue;
        }
        let (tag, _) = registry
            .meta(&entry.type_tag)
            .ok_or_else(|| RegistryError::UnknownTag(entry.type_tag.clone()))?;
        let resource = registry.create_from_document(tag, &entry.payload)?;
        staged.push((entry.guid, tag, resource));
    }
    for (guid, tag, resource) in staged {
        store.insert_with(guid, tag, resource)?;
        stats.loaded += 1;
    }
    Ok(stats)
}

/// Write bytes to a temporary sibling, then rename over the target
pub fn write_replace(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => path.with_extension(format!("{}.tmp", ext)),
        None => path.with_extension("tmp"),
    };
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}
