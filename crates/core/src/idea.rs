use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentSet;
use crate::types::{IdeaId, UserId};

/// Who can see an idea.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    /// Map the `isPrivate` request flag to a visibility.
    #[must_use]
    pub fn from_private_flag(is_private: bool) -> Self {
        if is_private {
            Self::Private
        } else {
            Self::Public
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
        }
    }

    /// Parse the stored representation. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PUBLIC" => Some(Self::Public),
            "PRIVATE" => Some(Self::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite primary key of an idea record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaKey {
    pub idea_id: IdeaId,
    pub user_id: UserId,
}

impl IdeaKey {
    pub fn new(idea_id: impl Into<IdeaId>, user_id: impl Into<UserId>) -> Self {
        Self {
            idea_id: idea_id.into(),
            user_id: user_id.into(),
        }
    }
}

impl fmt::Display for IdeaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.idea_id)
    }
}

/// The parts of a stored idea that the update path reads and writes.
///
/// Records carry more attributes (author, counters, creation date); backends
/// leave those untouched and do not surface them here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub idea_id: IdeaId,
    pub user_id: UserId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub stripped_content: Option<String>,
    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_attachments: AttachmentSet,
    #[serde(default)]
    pub image_attachments: AttachmentSet,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl Idea {
    /// A bare record with only its key set.
    #[must_use]
    pub fn new(key: &IdeaKey) -> Self {
        Self {
            idea_id: key.idea_id.clone(),
            user_id: key.user_id.clone(),
            title: String::new(),
            slug: String::new(),
            content: None,
            stripped_content: None,
            updated_date: None,
            file_attachments: AttachmentSet::new(),
            image_attachments: AttachmentSet::new(),
            preview_image: None,
            visibility: Visibility::Public,
        }
    }

    #[must_use]
    pub fn key(&self) -> IdeaKey {
        IdeaKey::new(self.idea_id.clone(), self.user_id.clone())
    }

    /// Overwrite every field the update path owns.
    pub fn apply(&mut self, update: &IdeaUpdate) {
        self.title.clone_from(&update.title);
        self.slug.clone_from(&update.slug);
        self.content.clone_from(&update.content);
        self.stripped_content.clone_from(&update.stripped_content);
        self.updated_date = Some(update.updated_date);
        self.file_attachments.clone_from(&update.file_attachments);
        self.image_attachments.clone_from(&update.image_attachments);
        self.preview_image.clone_from(&update.preview_image);
        self.visibility = update.visibility;
    }
}

/// Field values written by one update of an idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaUpdate {
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub stripped_content: Option<String>,
    pub updated_date: DateTime<Utc>,
    pub file_attachments: AttachmentSet,
    pub image_attachments: AttachmentSet,
    pub preview_image: Option<String>,
    pub visibility: Visibility,
}

impl IdeaUpdate {
    /// Build an update, deriving the preview image from the image list so the
    /// two can never disagree.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        slug: String,
        content: Option<String>,
        stripped_content: Option<String>,
        updated_date: DateTime<Utc>,
        file_attachments: AttachmentSet,
        image_attachments: AttachmentSet,
        visibility: Visibility,
    ) -> Self {
        let preview_image = image_attachments.first().map(str::to_owned);
        Self {
            title,
            slug,
            content,
            stripped_content,
            updated_date,
            file_attachments,
            image_attachments,
            preview_image,
            visibility,
        }
    }
}
