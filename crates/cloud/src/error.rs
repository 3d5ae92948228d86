use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to object storage or the CDN.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("{operation} {target} failed: {message}")]
    Request { operation: &'static str, target: String, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("response missing {0}")]
    MissingField(&'static str),
}

impl CloudError {
    pub(crate) fn request(
        operation: &'static str,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Request { operation, target: target.into(), message: message.into() }
    }
}
