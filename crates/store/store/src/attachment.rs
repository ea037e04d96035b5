use async_trait::async_trait;

use crate::error::StoreError;

/// Object storage holding uploaded idea attachments.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Delete the object stored under `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
