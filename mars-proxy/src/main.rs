use anyhow::Context;
use std::sync::Arc;

use mars_proxy::config::{API_KEY_ENV, DEMO_API_KEY, ProxyConfig};
use mars_proxy::logging;
use mars_proxy::nasa::NasaClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ProxyConfig::load("config.toml")?;

    let _logging_guard = logging::init_logging("logs", "mars-proxy", &config.log_level)?;

    tracing::info!("Mars proxy starting...");
    tracing::debug!("Loaded configuration: {:?}", config);

    let api_key = config.resolve_api_key()?;
    tracing::info!(
        "{}: {}",
        API_KEY_ENV,
        if api_key != DEMO_API_KEY { "set" } else { "NOT SET, using demo key" }
    );

    let upstream = NasaClient::new(&config.nasa_base_url, api_key, config.request_timeout_secs)
        .context("Failed to build NASA API client")?;
    let app = mars_proxy::build_app(&config, Arc::new(upstream));

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("API proxy running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received.");
        })
        .await?;

    Ok(())
}
