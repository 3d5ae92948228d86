use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sale_tracker_cloud::ObjectStore;
use sale_tracker_core::data_key;

use crate::ServiceError;

/// What happened to one persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Downloaded { bytes: usize },
    /// Missing remotely; the local copy was cleared so it starts fresh.
    Bootstrapped,
}

/// Downloads the persisted state files from `data/<name>` into scratch space.
///
/// The files describe one set of observations, so they are fetched as a unit:
/// either every file exists remotely, or (with bootstrapping on) none does and
/// all of them start empty. Any mix is an error.
pub struct StateFetcher {
    store: Arc<dyn ObjectStore>,
    scratch_dir: PathBuf,
    bootstrap_missing: bool,
}

impl StateFetcher {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        scratch_dir: impl Into<PathBuf>,
        bootstrap_missing: bool,
    ) -> Self {
        Self { store, scratch_dir: scratch_dir.into(), bootstrap_missing }
    }

    pub async fn fetch(&self, file_names: &[&str]) -> Result<Vec<FetchStatus>, ServiceError> {
        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|e| ServiceError::io(&self.scratch_dir, e))?;

        let mut remote = Vec::with_capacity(file_names.len());
        for name in file_names {
            let key = data_key(name);
            tracing::info!(key = %key, "Downloading file: {name}");
            let body = self.store.get(&key).await?;
            remote.push((*name, key, body));
        }

        let all_missing = remote.iter().all(|(_, _, body)| body.is_none());
        if all_missing && self.bootstrap_missing {
            for (name, key, _) in &remote {
                tracing::warn!(key = %key, "Remote state missing, starting fresh");
                remove_if_present(&self.scratch_dir.join(name)).await?;
            }
            return Ok(vec![FetchStatus::Bootstrapped; remote.len()]);
        }

        if let Some((_, key, _)) = remote.iter().find(|(_, _, body)| body.is_none()) {
            return Err(ServiceError::MissingState { key: key.clone() });
        }

        let mut statuses = Vec::with_capacity(remote.len());
        for (name, _, body) in remote {
            let Some(bytes) = body else { continue };
            let local = self.scratch_dir.join(name);
            let len = bytes.len();
            tokio::fs::write(&local, bytes).await.map_err(|e| ServiceError::io(&local, e))?;
            statuses.push(FetchStatus::Downloaded { bytes: len });
        }
        Ok(statuses)
    }
}

/// Clear leftovers from an earlier invocation sharing the scratch directory.
async fn remove_if_present(path: &Path) -> Result<(), ServiceError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ServiceError::io(path, e)),
    }
}
