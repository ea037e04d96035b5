use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use ideas_core::{BATCH_WRITE_CHUNK_SIZE, IdeaId, TagKey, TagRow, TagWrite};
use ideas_store::error::StoreError;
use ideas_store::tag::TagIndex;

/// In-memory [`TagIndex`].
///
/// Enforces the same batch rules as the hosted store (size limit, one write
/// per key) so chunking bugs surface in tests.
#[derive(Debug, Default)]
pub struct MemoryTagIndex {
    rows: DashMap<TagKey, TagRow>,
    batches: AtomicUsize,
}

impl MemoryTagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row, in no particular order.
    pub fn rows(&self) -> Vec<TagRow> {
        self.rows.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of batch writes applied so far.
    pub fn batches_written(&self) -> usize {
        self.batches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TagIndex for MemoryTagIndex {
    async fn tags_for_idea(&self, idea_id: &IdeaId) -> Result<Vec<String>, StoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|entry| &entry.key().idea_id == idea_id)
            .map(|entry| entry.key().tag.clone())
            .collect())
    }

    async fn write_batch(&self, writes: &[TagWrite]) -> Result<(), StoreError> {
        if writes.len() > BATCH_WRITE_CHUNK_SIZE {
            return Err(StoreError::Backend(format!(
                "batch of {} writes exceeds the limit of {BATCH_WRITE_CHUNK_SIZE}",
                writes.len()
            )));
        }
        if writes.iter().any(|w| w.key().tag.is_empty()) {
            return Err(StoreError::Backend(
                "tag key attribute must not be empty".to_owned(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = writes.iter().map(TagWrite::key).find(|k| !seen.insert(k.clone())) {
            return Err(StoreError::Backend(format!(
                "batch touches ({}, {}) more than once",
                dup.tag, dup.idea_id
            )));
        }

        for write in writes {
            match write {
                TagWrite::Put(row) => {
                    self.rows.insert(row.key(), row.clone());
                }
                TagWrite::Delete(key) => {
                    self.rows.remove(key);
                }
            }
        }
        self.batches.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(writes = writes.len(), "applied tag batch");
        Ok(())
    }
}
