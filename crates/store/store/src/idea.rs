use async_trait::async_trait;

use ideas_core::{Idea, IdeaKey, IdeaUpdate};

use crate::error::StoreError;

/// Persistence for idea records, addressed by `(ideaId, userId)`.
#[async_trait]
pub trait IdeaStore: Send + Sync {
    /// Point lookup. Returns `None` if no record has this key.
    async fn get(&self, key: &IdeaKey) -> Result<Option<Idea>, StoreError>;

    /// Overwrite the fields owned by the update path on an existing record.
    ///
    /// Fails with [`StoreError::NotFound`] if the record does not exist; it
    /// never creates one.
    async fn update(&self, key: &IdeaKey, update: &IdeaUpdate) -> Result<(), StoreError>;

    /// Insert or replace a whole record. Used for seeding and local
    /// development; the update path never calls it.
    async fn put(&self, idea: &Idea) -> Result<(), StoreError>;
}
