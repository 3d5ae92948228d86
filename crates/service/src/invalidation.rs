use sale_tracker_cloud::CacheInvalidator;
use sale_tracker_core::{ENV_REFRESH_DISTRIBUTION, invalidation_paths};

/// Result of the conditional cache invalidation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationOutcome {
    Invalidated { id: String },
    Skipped,
    /// The request failed; the data update still stands.
    Failed { error: String },
}

impl InvalidationOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Invalidated { id } => format!("Invalidated CDN cache. Invalidation ID: {id}"),
            Self::Skipped => format!(
                "Skipping CDN cache invalidation. {ENV_REFRESH_DISTRIBUTION} is set to false"
            ),
            Self::Failed { error } => format!("CDN cache invalidation failed: {error}"),
        }
    }
}

/// Invalidate the five chart paths when `enabled`; otherwise make no call.
pub async fn invalidate_charts(
    invalidator: &dyn CacheInvalidator,
    enabled: bool,
) -> InvalidationOutcome {
    if !enabled {
        tracing::info!("Skipping CDN cache invalidation");
        return InvalidationOutcome::Skipped;
    }

    tracing::info!("Invalidating CDN cache");
    let caller_reference = chrono::Utc::now().timestamp_micros().to_string();
    match invalidator.invalidate(&invalidation_paths(), &caller_reference).await {
        Ok(id) => {
            tracing::info!(invalidation_id = %id, "Created invalidation");
            InvalidationOutcome::Invalidated { id }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Cache invalidation failed");
            InvalidationOutcome::Failed { error: e.to_string() }
        },
    }
}
