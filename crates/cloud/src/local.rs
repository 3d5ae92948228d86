//! Directory-backed object store for offline runs.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::{CacheInvalidator, CloudError, ObjectStore};

/// Stores each object as a file at `<root>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key under the root, refusing keys that would escape it.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CloudError> {
        let relative = Path::new(key);
        let escapes = relative.components().any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(CloudError::InvalidRequest(format!("object key {key:?}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CloudError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CloudError::Io { path, source }),
        }
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), CloudError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CloudError::Io { path: parent.to_path_buf(), source })?;
        }
        tokio::fs::write(&path, body).await.map_err(|source| CloudError::Io { path: path.clone(), source })?;
        tracing::debug!(key, content_type, path = %path.display(), "Stored object locally");
        Ok(())
    }
}

/// Stand-in for offline runs, where there is no CDN to refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledInvalidator;

#[async_trait]
impl CacheInvalidator for DisabledInvalidator {
    async fn invalidate(&self, _paths: &[String], _caller_reference: &str) -> Result<String, CloudError> {
        Err(CloudError::InvalidRequest("cache invalidation is disabled for local runs".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalObjectStore::new(temp_dir.path());
        store.put("site/images/day_graph.png", vec![1, 2, 3], "image/png").await.unwrap();
        assert!(temp_dir.path().join("site/images/day_graph.png").is_file());
        assert_eq!(store.get("site/images/day_graph.png").await.unwrap(), Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalObjectStore::new(temp_dir.path());
        assert_eq!(store.get("data/sales.rrd").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalObjectStore::new(temp_dir.path());
        store.put("data/sales.csv", b"1|1\n".to_vec(), "text/plain").await.unwrap();
        store.put("data/sales.csv", b"2|2\n".to_vec(), "text/plain").await.unwrap();
        assert_eq!(store.get("data/sales.csv").await.unwrap(), Some(b"2|2\n".to_vec()));
    }

    #[tokio::test]
    async fn test_disabled_invalidator_refuses() {
        let err = DisabledInvalidator.invalidate(&["/images/day_graph.png".to_owned()], "1").await;
        assert!(matches!(err, Err(CloudError::InvalidRequest(_))));
    }

    #[test]
    fn test_keys_cannot_escape_root() {
        let store = LocalObjectStore::new("/srv/objects");
        for key in ["../etc/passwd", "/etc/passwd", "data/../../x", ""] {
            assert!(store.path_for(key).is_err(), "{key}");
        }
        assert_eq!(store.path_for("data/a.rrd").unwrap(), PathBuf::from("/srv/objects/data/a.rrd"));
    }
}
