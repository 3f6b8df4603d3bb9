use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const NASA_BASE_URL: &str = "https://api.nasa.gov/mars-photos/api/v1";
pub const API_KEY_ENV: &str = "NASA_API_KEY";
/// Shared rate-limited key NASA hands out for experimentation
pub const DEMO_API_KEY: &str = "DEMO_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upstream Mars Rover Photos API root
    #[serde(default = "default_nasa_base_url")]
    pub nasa_base_url: String,

    /// Upstream request timeout. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Enable CORS for cross-origin requests
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Refuse to start without `NASA_API_KEY` instead of using the demo key
    #[serde(default)]
    pub require_api_key: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_nasa_base_url() -> String {
    NASA_BASE_URL.to_string()
}

fn default_enable_cors() -> bool {
    true
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            nasa_base_url: default_nasa_base_url(),
            request_timeout_secs: None,
            enable_cors: default_enable_cors(),
            require_api_key: false,
        }
    }
}

impl ProxyConfig {
    /// Load configuration from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let config: ProxyConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve the upstream key according to `require_api_key`
    pub fn resolve_api_key(&self) -> anyhow::Result<String> {
        if self.require_api_key {
            require_api_key()
        } else {
            Ok(api_key())
        }
    }
}

/// Upstream key for the request handlers: `NASA_API_KEY`, or the demo key when unset
pub fn api_key() -> String {
    api_key_or_demo(std::env::var(API_KEY_ENV).ok())
}

/// Strict variant for tooling that must not fall back to the demo key
pub fn require_api_key() -> anyhow::Result<String> {
    non_blank(std::env::var(API_KEY_ENV).ok())
        .with_context(|| format!("{} environment variable is not set", API_KEY_ENV))
}

fn api_key_or_demo(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEMO_API_KEY.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
