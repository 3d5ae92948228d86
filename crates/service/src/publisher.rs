use std::path::Path;
use std::sync::Arc;

use sale_tracker_cloud::ObjectStore;
use sale_tracker_core::{ArtifactRoute, is_chart, route_artifact};

use crate::ServiceError;

/// Uploads the updated state and the rendered charts.
pub struct StatePublisher {
    store: Arc<dyn ObjectStore>,
}

impl StatePublisher {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Upload every named file from `scratch_dir`, routed by suffix.
    ///
    /// All files are read before the first upload, so a missing local artifact
    /// aborts with nothing uploaded. The first failed upload aborts the rest.
    pub async fn publish(
        &self,
        scratch_dir: &Path,
        file_names: &[String],
    ) -> Result<Vec<ArtifactRoute>, ServiceError> {
        let mut staged = Vec::with_capacity(file_names.len());
        for name in file_names {
            let path = scratch_dir.join(name);
            let bytes = tokio::fs::read(&path).await.map_err(|e| ServiceError::io(&path, e))?;
            staged.push((name.as_str(), route_artifact(name), bytes));
        }

        let mut routes = Vec::with_capacity(staged.len());
        for (name, route, bytes) in staged {
            if is_chart(name) {
                tracing::info!(key = %route.key, "Uploading graph file: {name}");
            } else {
                tracing::info!(key = %route.key, "Uploading data file: {name}");
            }
            self.store.put(&route.key, bytes, route.content_type).await?;
            routes.push(route);
        }
        Ok(routes)
    }
}
