use sale_tracker_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("font registration failed: {0}")]
    Font(String),
    #[error("drawing {chart} failed: {message}")]
    Draw { chart: String, message: String },
    #[error("querying series failed: {0}")]
    Storage(#[from] StorageError),
}
