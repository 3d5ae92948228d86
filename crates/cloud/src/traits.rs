//! Backend trait abstraction for remote storage and cache invalidation.

use async_trait::async_trait;

use crate::CloudError;

/// Key/value object storage holding the persisted state and published charts.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object. Returns `Ok(None)` only when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CloudError>;

    /// Create or overwrite an object.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), CloudError>;
}

/// CDN cache invalidation.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Invalidate `paths`; `caller_reference` must be unique per request.
    /// Returns the invalidation id assigned by the CDN.
    async fn invalidate(&self, paths: &[String], caller_reference: &str)
    -> Result<String, CloudError>;
}
