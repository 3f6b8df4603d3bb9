use mars_common::{RoverManifest, RoverName};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::api::RoverApi;
use crate::error::ApiError;

/// One manifest per rover with no expiry. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct ManifestCache {
    entries: Arc<RwLock<HashMap<RoverName, RoverManifest>>>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rover: RoverName) -> Option<RoverManifest> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(&rover).cloned()
    }

    pub fn insert(&self, rover: RoverName, manifest: RoverManifest) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(rover, manifest);
    }

    /// Cached manifest, or fetch and remember it
    pub async fn get_or_fetch<A: RoverApi + ?Sized>(&self, rover: RoverName, api: &A) -> Result<RoverManifest, ApiError> {
        if let Some(manifest) = self.get(rover) {
            tracing::debug!("Manifest cache hit for {}", rover);
            return Ok(manifest);
        }

        tracing::debug!("Manifest cache miss for {}, fetching", rover);
        let manifest = api.fetch_manifest(rover).await?;
        self.insert(rover, manifest.clone());
        Ok(manifest)
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
