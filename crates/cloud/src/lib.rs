//! Remote collaborators of the pipeline: the object store holding the
//! authoritative state and the CDN in front of the published charts.

mod cloudfront;
mod error;
mod local;
mod s3;
mod traits;

pub use cloudfront::CloudFrontInvalidator;
pub use error::CloudError;
pub use local::{DisabledInvalidator, LocalObjectStore};
pub use s3::S3ObjectStore;
pub use traits::{CacheInvalidator, ObjectStore};

use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, SdkConfig};

/// Load the shared AWS configuration (default credential chain and region)
/// with every operation bounded by `timeout`.
pub async fn load_sdk_config(timeout: Duration) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build())
        .load()
        .await
}
