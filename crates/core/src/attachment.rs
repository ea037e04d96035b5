use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Object keys an idea references in the uploads bucket.
///
/// The store keeps attachments as a string set, so keys are de-duplicated on
/// construction and empty keys are dropped. First-seen order is preserved; the
/// first image key becomes the idea's preview image.
///
/// An empty set serializes as `null`, never as `[]`: the store has no empty
/// set value, so absence is the only encoding for "no attachments".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet(Vec<String>);

impl AttachmentSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from keys, keeping first-seen order.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for key in keys {
            let key = key.into();
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            out.push(key);
        }
        Self(out)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    /// The first key, used as the preview image.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Keys present in `self` but absent from `other`, in `self`'s order.
    #[must_use]
    pub fn difference<'a>(&'a self, other: &AttachmentSet) -> Vec<&'a str> {
        self.iter().filter(|key| !other.contains(key)).collect()
    }
}

impl FromIterator<String> for AttachmentSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::from_keys(iter)
    }
}

impl Serialize for AttachmentSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            serializer.serialize_none()
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AttachmentSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = Option::<Vec<String>>::deserialize(deserializer)?;
        Ok(Self::from_keys(keys.unwrap_or_default()))
    }
}
