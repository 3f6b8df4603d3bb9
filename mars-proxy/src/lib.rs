pub mod config;
pub mod error;
pub mod logging;
pub mod nasa;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::ProxyConfig;
use nasa::MarsPhotosUpstream;
use routes::AppState;

/// Full application: routes plus CORS and request tracing
pub fn build_app(config: &ProxyConfig, upstream: Arc<dyn MarsPhotosUpstream>) -> Router {
    let app = routes::router(AppState { upstream });

    let app = if config.enable_cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use mars_common::RoverName;
    use nasa::UpstreamError;
    use serde_json::Value;
    use tower::ServiceExt;

    struct OfflineUpstream;

    #[async_trait]
    impl MarsPhotosUpstream for OfflineUpstream {
        async fn manifest(&self, _rover: RoverName) -> Result<Value, UpstreamError> {
            Ok(Value::Null)
        }

        async fn photos(&self, _rover: RoverName, _query: &[(&'static str, String)]) -> Result<Value, UpstreamError> {
            Ok(Value::Null)
        }
    }

    fn rovers_request() -> Request<Body> {
        Request::builder()
            .uri("/api/rovers")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_enabled_by_default() {
        let app = build_app(&ProxyConfig::default(), Arc::new(OfflineUpstream));
        let response = app.oneshot(rovers_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_can_be_disabled() {
        let config = ProxyConfig { enable_cors: false, ..Default::default() };
        let app = build_app(&config, Arc::new(OfflineUpstream));
        let response = app.oneshot(rovers_request()).await.unwrap();

        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
