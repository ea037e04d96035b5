use async_trait::async_trait;
use dashmap::DashSet;

use ideas_store::attachment::AttachmentStore;
use ideas_store::error::StoreError;

/// In-memory [`AttachmentStore`] that tracks which object keys exist.
#[derive(Debug, Default)]
pub struct MemoryAttachmentStore {
    objects: DashSet<String>,
}

impl MemoryAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `keys`.
    pub fn with_objects<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for key in keys {
            store.insert(key);
        }
        store
    }

    pub fn insert(&self, key: impl Into<String>) {
        self.objects.insert(key.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains(key)
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.iter().map(|k| k.key().clone()).collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.objects.remove(key);
        Ok(())
    }
}
