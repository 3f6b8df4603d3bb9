use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use mars_common::{RoverName, rover_summaries};
use std::sync::Arc;

use crate::error::ProxyError;
use crate::nasa::MarsPhotosUpstream;

pub const ROVERS_CACHE_CONTROL: &str = "s-maxage=86400, stale-while-revalidate";
pub const MANIFEST_CACHE_CONTROL: &str = "s-maxage=21600, stale-while-revalidate=86400";
pub const PHOTOS_CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate=86400";

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn MarsPhotosUpstream>,
}

/// Query accepted by the photos route. Values are forwarded as-is.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PhotoParams {
    pub sol: Option<String>,
    pub earth_date: Option<String>,
    pub camera: Option<String>,
    pub page: Option<String>,
}

impl PhotoParams {
    /// Collect the known keys from raw query pairs. A repeated key keeps its
    /// first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sol" => &mut params.sol,
                "earth_date" => &mut params.earth_date,
                "camera" => &mut params.camera,
                "page" => &mut params.page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Upstream query. Sol wins over earth_date; with neither, sol=1.
    pub fn upstream_query(&self) -> Vec<(&'static str, String)> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        let mut query = Vec::with_capacity(3);
        if let Some(sol) = present(&self.sol) {
            query.push(("sol", sol.to_string()));
        } else if let Some(earth_date) = present(&self.earth_date) {
            query.push(("earth_date", earth_date.to_string()));
        } else {
            query.push(("sol", "1".to_string()));
        }
        if let Some(camera) = present(&self.camera) {
            query.push(("camera", camera.to_string()));
        }
        if let Some(page) = present(&self.page) {
            query.push(("page", page.to_string()));
        }
        query
    }
}

/// Routing table for `/api/*` plus the health check
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/rovers", get(list_rovers))
        .route("/api/rovers/{rover}/manifest", get(rover_manifest))
        .route("/api/rovers/{rover}/photos", get(rover_photos))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn list_rovers() -> Response {
    let body = serde_json::json!({ "rovers": rover_summaries() });
    ([(header::CACHE_CONTROL, ROVERS_CACHE_CONTROL)], Json(body)).into_response()
}

async fn rover_manifest(
    State(state): State<AppState>,
    Path(rover): Path<String>,
) -> Result<Response, ProxyError> {
    let rover: RoverName = rover.parse()?;

    let manifest = state
        .upstream
        .manifest(rover)
        .await
        .map_err(|e| ProxyError::from_upstream(e, "manifest"))?;

    Ok(([(header::CACHE_CONTROL, MANIFEST_CACHE_CONTROL)], Json(manifest)).into_response())
}

async fn rover_photos(
    State(state): State<AppState>,
    Path(rover): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ProxyError> {
    let rover: RoverName = rover.parse()?;
    let query = PhotoParams::from_pairs(pairs).upstream_query();

    let photos = state
        .upstream
        .photos(rover, &query)
        .await
        .map_err(|e| ProxyError::from_upstream(e, "photos"))?;

    Ok(([(header::CACHE_CONTROL, PHOTOS_CACHE_CONTROL)], Json(photos)).into_response())
}
