//! Append-only plaintext log of `timestamp|value` records.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use sale_tracker_core::Observation;

use crate::StorageError;

#[derive(Debug, Clone)]
pub struct SampleLog {
    path: PathBuf,
}

impl SampleLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. The file is created if missing, and is flushed and
    /// closed before this returns on every path.
    pub fn append(&self, observation: &Observation) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;
        file.write_all(observation.log_line().as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }

    /// Every record in file order. A missing file reads as an empty log.
    pub fn read_all(&self) -> Result<Vec<Observation>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| StorageError::io(&self.path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record = Observation::parse_log_line(&line)
                .map_err(|source| StorageError::Record { line: idx + 1, source })?;
            records.push(record);
        }
        Ok(records)
    }

    /// The newest `n` records, oldest first.
    pub fn tail(&self, n: usize) -> Result<Vec<Observation>, StorageError> {
        let mut records = self.read_all()?;
        let skip = records.len().saturating_sub(n);
        Ok(records.split_off(skip))
    }

    pub fn last(&self) -> Result<Option<Observation>, StorageError> {
        Ok(self.tail(1)?.pop())
    }
}
