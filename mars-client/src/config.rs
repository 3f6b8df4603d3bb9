use anyhow::Context;
use mars_common::NASA_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root of the proxy API, without trailing slash
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Items per page returned upstream. A page this long is taken to mean
    /// "more may follow", even though the last page can be exactly full.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Unset means no timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base() -> String {
    "http://localhost:3001/api".to_string()
}

fn default_page_size() -> usize {
    NASA_PAGE_SIZE
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            page_size: default_page_size(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: ClientConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        if config.page_size == 0 {
            anyhow::bail!("Invalid config file '{}': page_size must be at least 1", path.display());
        }
        Ok(config)
    }
}
