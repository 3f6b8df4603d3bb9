use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mars_common::InvalidRoverName;
use thiserror::Error;

use crate::nasa::UpstreamError;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error(transparent)]
    InvalidRover(#[from] InvalidRoverName),

    #[error("NASA API error: {text}")]
    Upstream { status: StatusCode, text: String },

    /// Anything else: network failure, timeout, undecodable body
    #[error("Failed to fetch {resource} from NASA API")]
    Transport { resource: &'static str },
}

impl ProxyError {
    /// Map an upstream failure for `resource` ("photos", "manifest")
    pub fn from_upstream(err: UpstreamError, resource: &'static str) -> Self {
        match err {
            UpstreamError::Status { status, text } => ProxyError::Upstream { status, text },
            UpstreamError::Transport(e) => {
                tracing::error!("Error fetching rover {}: {}", resource, e);
                ProxyError::Transport { resource }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRover(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
