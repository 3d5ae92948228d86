//! Typed error enum for the storage layer.

use std::io;
use std::path::PathBuf;

use sale_tracker_core::RecordError;
use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQL / file-format failure, including opening a file that is not a series store.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Update not strictly newer than the last one (minimum one second step).
    #[error("illegal attempt to update using time {timestamp} when last update time is {last_update}")]
    StaleUpdate { timestamp: i64, last_update: i64 },

    /// Reading or writing the plaintext log failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A log line could not be parsed.
    #[error("log line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    /// Value does not fit the store's signed 64-bit sample column.
    #[error("value {0} is out of range for the series store")]
    ValueOutOfRange(u64),

    /// Store parameters are unusable (non-positive step, heartbeat or retention).
    #[error("invalid store layout: {0}")]
    InvalidLayout(String),

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Whether this error is the store rejecting a same-second update.
    pub fn is_stale_update(&self) -> bool {
        matches!(self, Self::StaleUpdate { .. })
    }
}
