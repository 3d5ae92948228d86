//! Typed error enum for the service layer.
//!
//! Unifies configuration, storage, scrape, render and cloud failures into a
//! single error type so the pipeline can turn any of them into a response.

use std::path::PathBuf;

use sale_tracker_cloud::CloudError;
use sale_tracker_core::ConfigError;
use sale_tracker_render::RenderError;
use sale_tracker_scrape::ScrapeError;
use sale_tracker_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// Series store or log update failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Fetching the tracked page failed at the transport level.
    #[error("scrape: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("render: {0}")]
    Render(#[from] RenderError),

    /// Object storage or CDN call failed.
    #[error("cloud: {0}")]
    Cloud(#[from] CloudError),

    /// A persisted artifact does not exist remotely and bootstrapping is off.
    #[error(
        "remote state {key} not found (a fresh start needs every data file absent and TRACKER_BOOTSTRAP_MISSING=true)"
    )]
    MissingState { key: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(String),
}

impl ServiceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}
