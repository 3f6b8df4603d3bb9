use mars_common::InvalidRoverName;
use thiserror::Error;

/// Failure of a single request to the proxy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("API request failed ({status}): {text}")]
    Status { status: u16, text: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error(transparent)]
    InvalidRover(#[from] InvalidRoverName),
}
