use futures::future::Abortable;
use mars_common::{FilterUpdate, PhotosResponse, RoverManifest, RoverName, RoverPhoto};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::RoverApi;
use crate::cache::ManifestCache;
use crate::cancel::CancelToken;
use crate::config::ClientConfig;
use crate::error::{ApiError, BrowserError};
use crate::lightbox::Lightbox;
use crate::state::BrowserState;

enum Completion {
    Manifest {
        id: Uuid,
        rover: RoverName,
        result: Result<RoverManifest, ApiError>,
    },
    Photos {
        id: Uuid,
        page: u32,
        result: Result<PhotosResponse, ApiError>,
    },
}

/// What a committed completion changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserUpdate {
    ManifestLoaded { rover: RoverName, max_sol: u32 },
    ManifestFailed { rover: RoverName, message: String },
    PhotosLoaded { page: u32, count: usize },
    PhotosFailed { page: u32, message: String },
}

/// Owns the browsing state. At most one manifest and one photo request are
/// current; a completion whose token was superseded is dropped.
/// Must be used from within a tokio runtime.
pub struct PhotoBrowser<A: RoverApi> {
    api: Arc<A>,
    manifests: ManifestCache,
    page_size: usize,
    state: BrowserState,
    lightbox: Lightbox,
    manifest_request: Option<CancelToken>,
    photo_request: Option<CancelToken>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<A: RoverApi> PhotoBrowser<A> {
    pub fn new(api: Arc<A>, manifests: ManifestCache, page_size: usize) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            api,
            manifests,
            page_size,
            state: BrowserState::new(),
            lightbox: Lightbox::new(),
            manifest_request: None,
            photo_request: None,
            completions_tx,
            completions_rx,
        }
    }

    pub fn with_config(api: Arc<A>, manifests: ManifestCache, config: &ClientConfig) -> Self {
        Self::new(api, manifests, config.page_size)
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn manifests(&self) -> &ManifestCache {
        &self.manifests
    }

    /// Whether any current request is still outstanding
    pub fn in_flight(&self) -> bool {
        self.manifest_request.is_some() || self.photo_request.is_some()
    }

    /// Switch to `name`. Selecting the current rover again does nothing.
    pub fn select_rover(&mut self, name: &str) -> Result<(), BrowserError> {
        let rover: RoverName = name.parse()?;
        if self.state.rover() == Some(rover) {
            return Ok(());
        }

        tracing::info!("Selected rover {}", rover);
        self.cancel_all();
        self.state.reset_for_rover(Some(rover));
        self.lightbox.close();

        match self.manifests.get(rover) {
            Some(manifest) => {
                tracing::debug!("Manifest for {} already cached", rover);
                self.commit_manifest(manifest);
            }
            None => {
                self.start_manifest_fetch(rover);
                self.start_photo_fetch();
            }
        }
        Ok(())
    }

    /// Back to "no rover selected"; outstanding requests are cancelled
    pub fn clear_selection(&mut self) {
        self.cancel_all();
        self.state.reset_for_rover(None);
        self.lightbox.close();
    }

    /// Merge a filter change and refetch from page 1
    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.state.set_filters(update);
        self.lightbox.close();
        self.start_photo_fetch();
    }

    /// Fetch the next page. Returns false, doing nothing, while a page is
    /// loading or when the last page came back short.
    pub fn load_more(&mut self) -> bool {
        if self.state.rover().is_none() || !self.state.next_page() {
            return false;
        }
        self.start_photo_fetch();
        true
    }

    /// Re-issue the current filters from page 1, and the manifest if it failed
    pub fn retry(&mut self) -> bool {
        let Some(rover) = self.state.rover() else {
            return false;
        };

        if self.state.manifest().is_none() && self.manifest_request.is_none() {
            self.start_manifest_fetch(rover);
        }
        self.set_filters(FilterUpdate::new());
        true
    }

    /// Wait for the next completion that changes state and commit it.
    /// Returns `None` once nothing is in flight.
    pub async fn next_update(&mut self) -> Option<BrowserUpdate> {
        while self.in_flight() {
            let completion = self.completions_rx.recv().await?;
            if let Some(update) = self.commit(completion) {
                return Some(update);
            }
        }
        None
    }

    /// Drive all outstanding requests, including follow-ups they trigger
    pub async fn settle(&mut self) -> Vec<BrowserUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.next_update().await {
            updates.push(update);
        }
        updates
    }

    pub fn open_photo(&mut self, photo_id: u64) {
        self.lightbox.open(photo_id);
    }

    pub fn close_photo(&mut self) {
        self.lightbox.close();
    }

    pub fn lightbox_photo(&self) -> Option<&RoverPhoto> {
        self.lightbox.current(self.state.photos())
    }

    pub fn lightbox_position(&self) -> Option<(usize, usize)> {
        self.lightbox.position(self.state.photos())
    }

    pub fn next_photo(&mut self) -> Option<&RoverPhoto> {
        self.lightbox.next(self.state.photos())
    }

    pub fn prev_photo(&mut self) -> Option<&RoverPhoto> {
        self.lightbox.prev(self.state.photos())
    }

    fn cancel_all(&mut self) {
        for token in [self.manifest_request.take(), self.photo_request.take()]
            .into_iter()
            .flatten()
        {
            tracing::debug!(id = %token.id(), "Cancelling request");
            token.cancel();
        }
        self.state.cancel_fetch();
    }

    fn start_manifest_fetch(&mut self, rover: RoverName) {
        if let Some(previous) = self.manifest_request.take() {
            previous.cancel();
        }
        self.state.begin_manifest();

        let (token, registration) = CancelToken::new();
        let id = token.id();
        self.manifest_request = Some(token);
        tracing::debug!(%id, "Fetching manifest for {}", rover);

        let api = self.api.clone();
        let cache = self.manifests.clone();
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let fetch = async move { cache.get_or_fetch(rover, api.as_ref()).await };
            match Abortable::new(fetch, registration).await {
                Ok(result) => {
                    let _ = tx.send(Completion::Manifest { id, rover, result });
                }
                Err(_) => tracing::debug!(%id, "Manifest request for {} aborted", rover),
            }
        });
    }

    fn start_photo_fetch(&mut self) {
        let Some(rover) = self.state.rover() else {
            return;
        };
        if let Some(previous) = self.photo_request.take() {
            tracing::debug!(id = %previous.id(), "Superseding photo request");
            previous.cancel();
        }
        self.state.begin_fetch();

        let filters = self.state.filters().clone();
        let page = filters.page;
        let (token, registration) = CancelToken::new();
        let id = token.id();
        self.photo_request = Some(token);
        tracing::debug!(%id, "Fetching {} photos {:?}", rover, filters);

        let api = self.api.clone();
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let fetch = async move { api.fetch_photos(rover, &filters).await };
            match Abortable::new(fetch, registration).await {
                Ok(result) => {
                    let _ = tx.send(Completion::Photos { id, page, result });
                }
                Err(_) => tracing::debug!(%id, "Photo request aborted"),
            }
        });
    }

    fn take_if_current(slot: &mut Option<CancelToken>, id: Uuid) -> bool {
        let current = slot
            .as_ref()
            .is_some_and(|token| token.id() == id && !token.is_cancelled());
        if current {
            *slot = None;
        }
        current
    }

    fn commit(&mut self, completion: Completion) -> Option<BrowserUpdate> {
        match completion {
            Completion::Manifest { id, rover, result } => {
                if !Self::take_if_current(&mut self.manifest_request, id) {
                    tracing::debug!(%id, "Dropping stale manifest response");
                    return None;
                }
                match result {
                    Ok(manifest) => {
                        let max_sol = manifest.max_sol();
                        tracing::info!("Manifest for {} loaded, max sol {}", rover, max_sol);
                        self.commit_manifest(manifest);
                        Some(BrowserUpdate::ManifestLoaded { rover, max_sol })
                    }
                    Err(e) => {
                        let message = e.to_string();
                        tracing::warn!("Failed to load manifest for {}: {}", rover, message);
                        self.state.apply_manifest_error(message.clone());
                        Some(BrowserUpdate::ManifestFailed { rover, message })
                    }
                }
            }
            Completion::Photos { id, page, result } => {
                if !Self::take_if_current(&mut self.photo_request, id) {
                    tracing::debug!(%id, "Dropping stale photo response");
                    return None;
                }
                match result {
                    Ok(response) => {
                        let count = response.photos.len();
                        tracing::debug!("Photo page {} returned {} items", page, count);
                        self.state.apply_page(page, response.photos, self.page_size);
                        Some(BrowserUpdate::PhotosLoaded { page, count })
                    }
                    Err(e) => {
                        let message = e.to_string();
                        tracing::warn!("Failed to load photos page {}: {}", page, message);
                        self.state.apply_error(message.clone());
                        Some(BrowserUpdate::PhotosFailed { page, message })
                    }
                }
            }
        }
    }

    /// Store the manifest and jump to its latest sol
    fn commit_manifest(&mut self, manifest: RoverManifest) {
        let max_sol = manifest.max_sol();
        self.state.apply_manifest(manifest);
        self.set_filters(FilterUpdate::new().sol(max_sol).all_cameras());
    }
}

impl<A: RoverApi> Drop for PhotoBrowser<A> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
