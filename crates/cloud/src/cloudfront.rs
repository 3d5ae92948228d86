use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudfront::Client;
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};

use crate::{CacheInvalidator, CloudError};

/// Invalidates paths on one CloudFront distribution.
#[derive(Debug, Clone)]
pub struct CloudFrontInvalidator {
    client: Client,
    distribution_id: String,
}

impl CloudFrontInvalidator {
    #[must_use]
    pub const fn new(client: Client, distribution_id: String) -> Self {
        Self { client, distribution_id }
    }

    #[must_use]
    pub fn from_config(config: &SdkConfig, distribution_id: String) -> Self {
        Self::new(Client::new(config), distribution_id)
    }
}

#[async_trait]
impl CacheInvalidator for CloudFrontInvalidator {
    async fn invalidate(
        &self,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String, CloudError> {
        let quantity = i32::try_from(paths.len())
            .map_err(|_| CloudError::InvalidRequest(format!("{} paths", paths.len())))?;
        let paths = Paths::builder()
            .quantity(quantity)
            .set_items(Some(paths.to_vec()))
            .build()
            .map_err(|e| CloudError::InvalidRequest(e.to_string()))?;
        let batch = InvalidationBatch::builder()
            .paths(paths)
            .caller_reference(caller_reference)
            .build()
            .map_err(|e| CloudError::InvalidRequest(e.to_string()))?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(&self.distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| {
                CloudError::request(
                    "CreateInvalidation",
                    self.distribution_id.clone(),
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        output
            .invalidation()
            .map(|inv| inv.id().to_owned())
            .ok_or(CloudError::MissingField("Invalidation.Id"))
    }
}
