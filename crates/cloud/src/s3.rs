use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::{CloudError, ObjectStore};

/// Object store backed by one S3 bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    #[must_use]
    pub const fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    #[must_use]
    pub fn from_config(config: &SdkConfig, bucket: String) -> Self {
        Self::new(Client::new(config), bucket)
    }

    fn target(&self, key: &str) -> String {
        format!("s3://{}/{key}", self.bucket)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CloudError> {
        let output = match self.client.get_object().bucket(&self.bucket).key(key).send().await {
            Ok(output) => output,
            Err(err) if err.as_service_error().is_some_and(|e| e.is_no_such_key()) => {
                return Ok(None);
            },
            Err(err) => {
                return Err(CloudError::request(
                    "GetObject",
                    self.target(key),
                    DisplayErrorContext(&err).to_string(),
                ));
            },
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| CloudError::request("GetObject", self.target(key), e.to_string()))?
            .into_bytes();
        tracing::debug!(key, bytes = bytes.len(), "Downloaded object");
        Ok(Some(bytes.to_vec()))
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), CloudError> {
        let len = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                CloudError::request("PutObject", self.target(key), DisplayErrorContext(&e).to_string())
            })?;
        tracing::debug!(key, bytes = len, content_type, "Uploaded object");
        Ok(())
    }
}
