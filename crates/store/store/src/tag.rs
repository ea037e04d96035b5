use async_trait::async_trait;

use ideas_core::{IdeaId, TagWrite};

use crate::error::StoreError;

/// The tag association table and its reverse (`ideaId`) index.
#[async_trait]
pub trait TagIndex: Send + Sync {
    /// All tags currently associated with `idea_id`, read through the
    /// reverse index. Order is unspecified.
    async fn tags_for_idea(&self, idea_id: &IdeaId) -> Result<Vec<String>, StoreError>;

    /// Apply a batch of puts and deletes.
    ///
    /// Callers keep batches at or below
    /// [`BATCH_WRITE_CHUNK_SIZE`](ideas_core::BATCH_WRITE_CHUNK_SIZE) and never
    /// touch the same row key twice in one batch. A batch that is only
    /// partially applied is an error.
    async fn write_batch(&self, writes: &[TagWrite]) -> Result<(), StoreError>;
}
