use async_trait::async_trait;
use mars_common::RoverName;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status
    #[error("upstream returned {status}: {text}")]
    Status { status: StatusCode, text: String },

    #[error("request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The upstream seen by the route handlers
#[async_trait]
pub trait MarsPhotosUpstream: Send + Sync {
    async fn manifest(&self, rover: RoverName) -> Result<Value, UpstreamError>;

    async fn photos(
        &self,
        rover: RoverName,
        query: &[(&'static str, String)],
    ) -> Result<Value, UpstreamError>;
}

pub struct NasaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NasaClient {
    pub fn new(base_url: &str, api_key: String, timeout_secs: Option<u64>) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn get_json(&self, url: &str, query: &[(&'static str, String)]) -> Result<Value, UpstreamError> {
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            tracing::warn!("Upstream {} answered {}", url, status);
            return Err(UpstreamError::Status { status, text });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MarsPhotosUpstream for NasaClient {
    async fn manifest(&self, rover: RoverName) -> Result<Value, UpstreamError> {
        let url = format!("{}/manifests/{}", self.base_url, rover);
        self.get_json(&url, &[]).await
    }

    async fn photos(
        &self,
        rover: RoverName,
        query: &[(&'static str, String)],
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}/rovers/{}/photos", self.base_url, rover);
        self.get_json(&url, query).await
    }
}
