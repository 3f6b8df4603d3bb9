use mars_common::{
    DateSelector, FilterUpdate, ManifestSolEntry, PhotoFilters, RoverManifest, RoverName,
    RoverPhoto, camera_full_name,
};

/// Camera entry for the filter dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraOption {
    pub name: String,
    pub full_name: String,
}

#[derive(Debug, Clone)]
pub struct BrowserState {
    rover: Option<RoverName>,
    filters: PhotoFilters,
    photos: Vec<RoverPhoto>,
    loading: bool,
    error: Option<String>,
    has_more: bool,
    manifest: Option<RoverManifest>,
    manifest_loading: bool,
    manifest_error: Option<String>,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            rover: None,
            filters: PhotoFilters::default(),
            photos: Vec::new(),
            loading: false,
            error: None,
            has_more: true,
            manifest: None,
            manifest_loading: false,
            manifest_error: None,
        }
    }
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rover(&self) -> Option<RoverName> {
        self.rover
    }

    pub fn filters(&self) -> &PhotoFilters {
        &self.filters
    }

    pub fn photos(&self) -> &[RoverPhoto] {
        &self.photos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn manifest(&self) -> Option<&RoverManifest> {
        self.manifest.as_ref()
    }

    pub fn is_manifest_loading(&self) -> bool {
        self.manifest_loading
    }

    pub fn manifest_error(&self) -> Option<&str> {
        self.manifest_error.as_deref()
    }

    /// Start a new session for `rover`; `None` means nothing selected
    pub fn reset_for_rover(&mut self, rover: Option<RoverName>) {
        *self = Self {
            rover,
            ..Self::default()
        };
    }

    /// Merge a filter change. Page returns to 1 and the list is emptied.
    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.filters.merge(update);
        self.photos.clear();
        self.has_more = true;
    }

    /// Advance to the next page, unless a fetch is running or nothing is left
    pub fn next_page(&mut self) -> bool {
        if self.loading || !self.has_more {
            return false;
        }
        self.filters.page += 1;
        true
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Commit a fetched page. Page 1 replaces the list, later pages append.
    ///
    /// `has_more` is true only for a full page. A full last page still reports
    /// `has_more` and the following fetch comes back empty.
    pub fn apply_page(&mut self, page: u32, photos: Vec<RoverPhoto>, page_size: usize) {
        self.has_more = photos.len() == page_size;
        if page == 1 {
            self.photos = photos;
        } else {
            self.photos.extend(photos);
        }
        self.loading = false;
    }

    pub fn apply_error(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// Drop the loading flag of a request that was cancelled without a successor
    pub fn cancel_fetch(&mut self) {
        self.loading = false;
    }

    pub fn begin_manifest(&mut self) {
        self.manifest_loading = true;
        self.manifest_error = None;
    }

    pub fn apply_manifest(&mut self, manifest: RoverManifest) {
        self.manifest = Some(manifest);
        self.manifest_loading = false;
        self.manifest_error = None;
    }

    pub fn apply_manifest_error(&mut self, message: String) {
        self.manifest_error = Some(message);
        self.manifest_loading = false;
    }

    /// Manifest entry for the sol currently filtered on
    pub fn current_sol_entry(&self) -> Option<&ManifestSolEntry> {
        let DateSelector::Sol(sol) = self.filters.date else {
            return None;
        };
        self.manifest.as_ref()?.sol_entry(sol)
    }

    /// Cameras that took photos on the current sol, with catalog names
    pub fn available_cameras(&self) -> Vec<CameraOption> {
        let (Some(rover), Some(entry)) = (self.rover, self.current_sol_entry()) else {
            return Vec::new();
        };

        entry
            .cameras
            .iter()
            .map(|name| CameraOption {
                name: name.clone(),
                full_name: camera_full_name(rover, name)
                    .map(str::to_string)
                    .unwrap_or_else(|| name.clone()),
            })
            .collect()
    }
}
