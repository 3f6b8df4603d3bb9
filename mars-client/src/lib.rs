pub mod api;
pub mod browser;
pub mod cache;
pub mod cancel;
pub mod config;
pub mod error;
pub mod lightbox;
pub mod state;

#[cfg(test)]
mod testing;

pub use api::{HttpRoverApi, RoverApi};
pub use browser::{BrowserUpdate, PhotoBrowser};
pub use cache::ManifestCache;
pub use cancel::CancelToken;
pub use config::ClientConfig;
pub use error::{ApiError, BrowserError};
pub use lightbox::Lightbox;
pub use state::{BrowserState, CameraOption};
