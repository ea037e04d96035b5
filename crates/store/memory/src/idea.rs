use async_trait::async_trait;
use dashmap::DashMap;

use ideas_core::{Idea, IdeaKey, IdeaUpdate};
use ideas_store::error::StoreError;
use ideas_store::idea::IdeaStore;

/// In-memory [`IdeaStore`] backed by a [`DashMap`].
#[derive(Debug, Default)]
pub struct MemoryIdeaStore {
    data: DashMap<IdeaKey, Idea>,
}

impl MemoryIdeaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl IdeaStore for MemoryIdeaStore {
    async fn get(&self, key: &IdeaKey) -> Result<Option<Idea>, StoreError> {
        Ok(self.data.get(key).map(|entry| entry.value().clone()))
    }

    async fn update(&self, key: &IdeaKey, update: &IdeaUpdate) -> Result<(), StoreError> {
        // `get_mut` holds the shard lock, so the existence check and the write
        // are atomic like a conditional update.
        let Some(mut entry) = self.data.get_mut(key) else {
            return Err(StoreError::NotFound(key.to_string()));
        };
        entry.apply(update);
        Ok(())
    }

    async fn put(&self, idea: &Idea) -> Result<(), StoreError> {
        self.data.insert(idea.key(), idea.clone());
        Ok(())
    }
}
