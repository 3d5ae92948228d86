//! Remote key layout and upload routing.

use crate::Period;

/// Suffix shared by every chart artifact.
pub const CHART_SUFFIX: &str = "_graph.png";

/// Key prefix for chart images.
pub const IMAGES_PREFIX: &str = "site/images/";

/// Key prefix for the database and the log.
pub const DATA_PREFIX: &str = "data/";

/// Path prefix of chart images as served by the CDN (the distribution origin is `site/`).
pub const CDN_IMAGES_PATH: &str = "/images/";

pub const IMAGE_CONTENT_TYPE: &str = "image/png";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Where a local artifact lands in the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRoute {
    pub key: String,
    pub content_type: &'static str,
}

/// Route an artifact by file name alone: charts go under the images prefix,
/// everything else under the data prefix.
#[must_use]
pub fn route_artifact(file_name: &str) -> ArtifactRoute {
    if is_chart(file_name) {
        ArtifactRoute { key: format!("{IMAGES_PREFIX}{file_name}"), content_type: IMAGE_CONTENT_TYPE }
    } else {
        ArtifactRoute { key: data_key(file_name), content_type: TEXT_CONTENT_TYPE }
    }
}

#[must_use]
pub fn is_chart(file_name: &str) -> bool {
    file_name.ends_with(CHART_SUFFIX)
}

/// Key of a persisted data file (`data/<name>`).
#[must_use]
pub fn data_key(file_name: &str) -> String {
    format!("{DATA_PREFIX}{file_name}")
}

/// CDN paths of the five charts, in period order.
#[must_use]
pub fn invalidation_paths() -> Vec<String> {
    Period::ALL.iter().map(|p| format!("{CDN_IMAGES_PATH}{}", p.chart_file_name())).collect()
}
