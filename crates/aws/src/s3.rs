use async_trait::async_trait;
use tracing::{debug, info, instrument};

use ideas_store::{AttachmentStore, StoreError};

use crate::auth::build_sdk_config;
use crate::config::AwsConfig;
use crate::error::to_store_error;

/// S3 bucket holding user uploads referenced by idea attachments.
pub struct S3AttachmentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl std::fmt::Debug for S3AttachmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3AttachmentStore")
            .field("bucket", &self.bucket)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3AttachmentStore {
    /// Build a store with its own SDK configuration.
    pub async fn new(config: &AwsConfig, bucket: impl Into<String>) -> Self {
        let sdk_config = build_sdk_config(config).await;
        Self::from_sdk_config(&sdk_config, bucket)
    }

    /// Build a store from a shared SDK configuration.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig, bucket: impl Into<String>) -> Self {
        // Path-style addressing keeps LocalStack endpoints working.
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(sdk_config.endpoint_url().is_some())
            .build();
        Self::from_client(aws_sdk_s3::Client::from_conf(s3_config), bucket)
    }

    pub fn from_client(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl AttachmentStore for S3AttachmentStore {
    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        debug!("deleting attachment object");
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let err = to_store_error(&e);
                debug!(error = %err, "S3 delete_object failed");
                err
            })?;
        info!("attachment object deleted");
        Ok(())
    }
}
