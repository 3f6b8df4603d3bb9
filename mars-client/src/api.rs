use async_trait::async_trait;
use mars_common::{PhotoFilters, PhotosResponse, RoverManifest, RoverName};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Read-only view of the proxy API used by the browser
#[async_trait]
pub trait RoverApi: Send + Sync + 'static {
    async fn fetch_manifest(&self, rover: RoverName) -> Result<RoverManifest, ApiError>;

    async fn fetch_photos(&self, rover: RoverName, filters: &PhotoFilters) -> Result<PhotosResponse, ApiError>;
}

#[derive(Clone)]
pub struct HttpRoverApi {
    client: Client,
    api_base: String,
}

impl HttpRoverApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn manifest_url(&self, rover: RoverName) -> String {
        format!("{}/rovers/{}/manifest", self.api_base, rover)
    }

    pub fn photos_url(&self, rover: RoverName) -> String {
        format!("{}/rovers/{}/photos", self.api_base, rover)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            return Err(ApiError::Status { status: status.as_u16(), text });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RoverApi for HttpRoverApi {
    async fn fetch_manifest(&self, rover: RoverName) -> Result<RoverManifest, ApiError> {
        self.fetch_json(&self.manifest_url(rover), &[]).await
    }

    async fn fetch_photos(&self, rover: RoverName, filters: &PhotoFilters) -> Result<PhotosResponse, ApiError> {
        self.fetch_json(&self.photos_url(rover), &filters.query_pairs()).await
    }
}
