use async_trait::async_trait;
use mars_common::{
    DateSelector, ManifestSolEntry, PhotoCamera, PhotoFilters, PhotoManifest, PhotoRover,
    PhotosResponse, RoverManifest, RoverName, RoverPhoto,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::api::RoverApi;
use crate::error::ApiError;

type PhotoReply = oneshot::Sender<Result<PhotosResponse, ApiError>>;
type ManifestReply = oneshot::Sender<Result<RoverManifest, ApiError>>;

#[derive(Default)]
struct Inner {
    manifests: HashMap<RoverName, RoverManifest>,
    manifest_calls: HashMap<RoverName, usize>,
    /// Total photos available per date selector
    photo_totals: HashMap<DateSelector, usize>,
    photo_calls: Vec<(RoverName, PhotoFilters)>,
    photo_failure: Option<ApiError>,
    hold_manifests: bool,
    hold_photos: bool,
    pending_manifests: Vec<(RoverName, ManifestReply)>,
    pending_photos: Vec<(PhotoFilters, PhotoReply)>,
}

/// Answers immediately from canned data, or holds requests until the test
/// resolves them so completions can be reordered
#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_manifest(&self, rover: RoverName, manifest: RoverManifest) {
        self.inner.lock().unwrap().manifests.insert(rover, manifest);
    }

    pub fn set_photo_total(&self, date: DateSelector, total: usize) {
        self.inner.lock().unwrap().photo_totals.insert(date, total);
    }

    pub fn fail_photos(&self, error: Option<ApiError>) {
        self.inner.lock().unwrap().photo_failure = error;
    }

    pub fn hold_manifests(&self, hold: bool) {
        self.inner.lock().unwrap().hold_manifests = hold;
    }

    pub fn hold_photos(&self, hold: bool) {
        self.inner.lock().unwrap().hold_photos = hold;
    }

    pub fn manifest_calls(&self, rover: RoverName) -> usize {
        self.inner.lock().unwrap().manifest_calls.get(&rover).copied().unwrap_or(0)
    }

    pub fn photo_calls(&self) -> Vec<(RoverName, PhotoFilters)> {
        self.inner.lock().unwrap().photo_calls.clone()
    }

    pub fn pending_photo_filters(&self) -> Vec<PhotoFilters> {
        self.inner.lock().unwrap().pending_photos.iter().map(|(f, _)| f.clone()).collect()
    }

    /// Yield until at least `count` photo requests are parked
    pub async fn wait_pending_photos(&self, count: usize) {
        while self.inner.lock().unwrap().pending_photos.len() < count {
            tokio::task::yield_now().await;
        }
    }

    pub async fn wait_pending_manifests(&self, count: usize) {
        while self.inner.lock().unwrap().pending_manifests.len() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Answer the parked photo request at `index` (in arrival order)
    pub fn resolve_photos(&self, index: usize, result: Result<PhotosResponse, ApiError>) {
        let (_, reply) = self.inner.lock().unwrap().pending_photos.remove(index);
        let _ = reply.send(result);
    }

    pub fn resolve_manifest(&self, index: usize, result: Result<RoverManifest, ApiError>) {
        let (_, reply) = self.inner.lock().unwrap().pending_manifests.remove(index);
        let _ = reply.send(result);
    }

    fn page_for(&self, rover: RoverName, filters: &PhotoFilters) -> Result<PhotosResponse, ApiError> {
        let inner = self.inner.lock().unwrap();
        if let Some(error) = &inner.photo_failure {
            return Err(error.clone());
        }

        let total = inner.photo_totals.get(&filters.date).copied().unwrap_or(0);
        let start = (filters.page as usize - 1) * mars_common::NASA_PAGE_SIZE;
        let end = total.min(start + mars_common::NASA_PAGE_SIZE);
        let sol = filters.date.sol().unwrap_or(0);

        Ok(PhotosResponse {
            photos: (start..end.max(start)).map(|i| photo(rover, sol, i as u64 + 1)).collect(),
        })
    }
}

#[async_trait]
impl RoverApi for FakeApi {
    async fn fetch_manifest(&self, rover: RoverName) -> Result<RoverManifest, ApiError> {
        let parked = {
            let mut inner = self.inner.lock().unwrap();
            *inner.manifest_calls.entry(rover).or_default() += 1;
            if inner.hold_manifests {
                let (tx, rx) = oneshot::channel();
                inner.pending_manifests.push((rover, tx));
                Some(rx)
            } else {
                None
            }
        };

        if let Some(rx) = parked {
            return rx.await.unwrap_or_else(|_| Err(ApiError::Transport("dropped".to_string())));
        }

        self.inner
            .lock()
            .unwrap()
            .manifests
            .get(&rover)
            .cloned()
            .ok_or_else(|| ApiError::Status { status: 404, text: "Not Found".to_string() })
    }

    async fn fetch_photos(&self, rover: RoverName, filters: &PhotoFilters) -> Result<PhotosResponse, ApiError> {
        let parked = {
            let mut inner = self.inner.lock().unwrap();
            inner.photo_calls.push((rover, filters.clone()));
            if inner.hold_photos {
                let (tx, rx) = oneshot::channel();
                inner.pending_photos.push((filters.clone(), tx));
                Some(rx)
            } else {
                None
            }
        };

        if let Some(rx) = parked {
            return rx.await.unwrap_or_else(|_| Err(ApiError::Transport("dropped".to_string())));
        }

        self.page_for(rover, filters)
    }
}

pub fn manifest(name: &str, max_sol: u32, sols: &[(u32, &[&str])]) -> RoverManifest {
    RoverManifest {
        photo_manifest: PhotoManifest {
            name: name.to_string(),
            landing_date: "2012-08-06".to_string(),
            launch_date: "2011-11-26".to_string(),
            status: "active".to_string(),
            max_sol,
            max_date: "2024-02-19".to_string(),
            total_photos: 1000,
            photos: sols
                .iter()
                .map(|(sol, cameras)| ManifestSolEntry {
                    sol: *sol,
                    earth_date: "2012-08-07".to_string(),
                    total_photos: 10,
                    cameras: cameras.iter().map(|c| c.to_string()).collect(),
                })
                .collect(),
        },
    }
}

pub fn photo(rover: RoverName, sol: u32, id: u64) -> RoverPhoto {
    RoverPhoto {
        id,
        sol,
        camera: PhotoCamera {
            id: 20,
            name: "FHAZ".to_string(),
            rover_id: 5,
            full_name: "Front Hazard Avoidance Camera".to_string(),
        },
        img_src: format!("https://mars.nasa.gov/{}/{}.jpg", rover, id),
        earth_date: "2015-05-30".to_string(),
        rover: PhotoRover {
            id: 5,
            name: rover.to_string(),
            landing_date: "2012-08-06".to_string(),
            launch_date: "2011-11-26".to_string(),
            status: "active".to_string(),
        },
    }
}

pub fn photos(rover: RoverName, sol: u32, first_id: u64, count: usize) -> PhotosResponse {
    PhotosResponse {
        photos: (0..count as u64).map(|i| photo(rover, sol, first_id + i)).collect(),
    }
}
