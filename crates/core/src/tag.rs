//! Tag association rows and the write requests that replace them.
//!
//! An idea's tags live in a separate table keyed by `(tag, ideaId)`, with a
//! reverse index on `ideaId`. Updates replace the whole set: every existing
//! row is deleted, then the new rows are inserted, both in batches of at most
//! [`BATCH_WRITE_CHUNK_SIZE`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{IdeaId, UserId};

/// Maximum number of tags accepted on a single idea.
pub const MAX_TAGS: usize = 100;

/// Maximum number of write requests in one batch-write call.
pub const BATCH_WRITE_CHUNK_SIZE: usize = 25;

/// Primary key of a tag association row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagKey {
    pub tag: String,
    pub idea_id: IdeaId,
}

/// A tag association row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRow {
    pub tag: String,
    pub idea_id: IdeaId,
    pub user_id: UserId,
}

impl TagRow {
    #[must_use]
    pub fn key(&self) -> TagKey {
        TagKey {
            tag: self.tag.clone(),
            idea_id: self.idea_id.clone(),
        }
    }
}

/// One entry of a batch write against the tag table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagWrite {
    Put(TagRow),
    Delete(TagKey),
}

impl TagWrite {
    /// The row key this write touches.
    #[must_use]
    pub fn key(&self) -> TagKey {
        match self {
            Self::Put(row) => row.key(),
            Self::Delete(key) => key.clone(),
        }
    }
}

/// Build insert requests for `tags`, in the order given.
///
/// Repeated tags map to the same row key; only the first occurrence is kept,
/// since a batch write may not touch the same key twice.
#[must_use]
pub fn put_requests(tags: &[String], owner: &UserId, idea_id: &IdeaId) -> Vec<TagWrite> {
    unique(tags)
        .map(|tag| {
            TagWrite::Put(TagRow {
                tag: tag.to_owned(),
                idea_id: idea_id.clone(),
                user_id: owner.clone(),
            })
        })
        .collect()
}

/// Build delete requests for the rows of `tags` on `idea_id`.
#[must_use]
pub fn delete_requests(tags: &[String], idea_id: &IdeaId) -> Vec<TagWrite> {
    unique(tags)
        .map(|tag| {
            TagWrite::Delete(TagKey {
                tag: tag.to_owned(),
                idea_id: idea_id.clone(),
            })
        })
        .collect()
}

/// Distinct, non-empty tags in first-seen order. An empty tag is not a valid
/// row key.
fn unique(tags: &[String]) -> impl Iterator<Item = &str> {
    let mut seen = HashSet::new();
    tags.iter()
        .map(String::as_str)
        .filter(|tag| !tag.is_empty())
        .filter(move |tag| seen.insert(*tag))
}
