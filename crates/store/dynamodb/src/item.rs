//! Attribute mapping between domain types and `DynamoDB` items.
//!
//! Empty attachment lists and absent optional strings are written as the
//! `NULL` attribute; `DynamoDB` rejects empty string sets. Reads accept
//! `NULL`, a missing attribute, a string set or a list of strings.

use std::collections::HashMap;

use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, PutRequest, WriteRequest};
use chrono::{DateTime, NaiveDateTime, Utc};

use ideas_core::{AttachmentSet, Idea, IdeaUpdate, TagWrite, Visibility};
use ideas_store::StoreError;

pub(crate) type Item = HashMap<String, AttributeValue>;

pub(crate) const IDEA_ID: &str = "ideaId";
pub(crate) const USER_ID: &str = "userId";
pub(crate) const TAG: &str = "tag";

const TITLE: &str = "title";
const SLUG: &str = "slug";
const CONTENT: &str = "content";
const STRIPPED_CONTENT: &str = "strippedContent";
const UPDATED_DATE: &str = "updatedDate";
const FILE_ATTACHMENTS: &str = "fileAttachments";
const IMAGE_ATTACHMENTS: &str = "imageAttachments";
const PREVIEW_IMAGE: &str = "previewImage";
const VISIBILITY: &str = "visibility";

pub(crate) fn string(value: &str) -> AttributeValue {
    AttributeValue::S(value.to_owned())
}

fn nullable_string(value: Option<&str>) -> AttributeValue {
    match value {
        Some(v) if !v.is_empty() => string(v),
        _ => AttributeValue::Null(true),
    }
}

fn nullable_string_set(set: &AttachmentSet) -> AttributeValue {
    if set.is_empty() {
        AttributeValue::Null(true)
    } else {
        AttributeValue::Ss(set.as_slice().to_vec())
    }
}

fn read_string(item: &Item, name: &str) -> Option<String> {
    match item.get(name) {
        Some(AttributeValue::S(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn read_string_set(item: &Item, name: &str) -> AttachmentSet {
    match item.get(name) {
        Some(AttributeValue::Ss(values)) => values.iter().cloned().collect(),
        Some(AttributeValue::L(values)) => values
            .iter()
            .filter_map(|v| v.as_s().ok().cloned())
            .collect(),
        _ => AttachmentSet::new(),
    }
}

/// Parse a stored timestamp. Older records carry a naive ISO-8601 value
/// without an offset; those are taken as UTC.
fn read_timestamp(item: &Item, name: &str) -> Option<DateTime<Utc>> {
    let raw = read_string(item, name)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn build_error(err: &BuildError) -> StoreError {
    StoreError::Serialization(err.to_string())
}

/// `(attribute, value)` pairs written by an update, in expression order.
pub(crate) fn update_values(update: &IdeaUpdate) -> Vec<(&'static str, AttributeValue)> {
    vec![
        (TITLE, string(&update.title)),
        (SLUG, string(&update.slug)),
        (CONTENT, nullable_string(update.content.as_deref())),
        (
            STRIPPED_CONTENT,
            nullable_string(update.stripped_content.as_deref()),
        ),
        (UPDATED_DATE, string(&update.updated_date.to_rfc3339())),
        (FILE_ATTACHMENTS, nullable_string_set(&update.file_attachments)),
        (
            IMAGE_ATTACHMENTS,
            nullable_string_set(&update.image_attachments),
        ),
        (PREVIEW_IMAGE, nullable_string(update.preview_image.as_deref())),
        (VISIBILITY, string(update.visibility.as_str())),
    ]
}

/// `SET #a = :a, ...` over the attributes of [`update_values`].
pub(crate) fn update_expression(values: &[(&'static str, AttributeValue)]) -> String {
    let assignments: Vec<String> = values
        .iter()
        .map(|(name, _)| format!("#{name} = :{name}"))
        .collect();
    format!("SET {}", assignments.join(", "))
}

pub(crate) fn idea_to_item(idea: &Idea) -> Item {
    let mut item = Item::new();
    item.insert(IDEA_ID.to_owned(), string(idea.idea_id.as_str()));
    item.insert(USER_ID.to_owned(), string(idea.user_id.as_str()));
    item.insert(TITLE.to_owned(), string(&idea.title));
    item.insert(SLUG.to_owned(), string(&idea.slug));
    item.insert(CONTENT.to_owned(), nullable_string(idea.content.as_deref()));
    item.insert(
        STRIPPED_CONTENT.to_owned(),
        nullable_string(idea.stripped_content.as_deref()),
    );
    let updated = idea.updated_date.map(|d| d.to_rfc3339());
    item.insert(UPDATED_DATE.to_owned(), nullable_string(updated.as_deref()));
    item.insert(
        FILE_ATTACHMENTS.to_owned(),
        nullable_string_set(&idea.file_attachments),
    );
    item.insert(
        IMAGE_ATTACHMENTS.to_owned(),
        nullable_string_set(&idea.image_attachments),
    );
    item.insert(
        PREVIEW_IMAGE.to_owned(),
        nullable_string(idea.preview_image.as_deref()),
    );
    item.insert(VISIBILITY.to_owned(), string(idea.visibility.as_str()));
    item
}

pub(crate) fn item_to_idea(item: &Item) -> Result<Idea, StoreError> {
    let idea_id = read_string(item, IDEA_ID)
        .ok_or_else(|| StoreError::Serialization(format!("item is missing {IDEA_ID}")))?;
    let user_id = read_string(item, USER_ID)
        .ok_or_else(|| StoreError::Serialization(format!("item is missing {USER_ID}")))?;

    Ok(Idea {
        idea_id: idea_id.into(),
        user_id: user_id.into(),
        title: read_string(item, TITLE).unwrap_or_default(),
        slug: read_string(item, SLUG).unwrap_or_default(),
        content: read_string(item, CONTENT),
        stripped_content: read_string(item, STRIPPED_CONTENT),
        updated_date: read_timestamp(item, UPDATED_DATE),
        file_attachments: read_string_set(item, FILE_ATTACHMENTS),
        image_attachments: read_string_set(item, IMAGE_ATTACHMENTS),
        preview_image: read_string(item, PREVIEW_IMAGE),
        visibility: read_string(item, VISIBILITY)
            .and_then(|v| Visibility::parse(&v))
            .unwrap_or_default(),
    })
}

pub(crate) fn tag_write_request(write: &TagWrite) -> Result<WriteRequest, StoreError> {
    let request = match write {
        TagWrite::Put(row) => {
            let mut item = Item::new();
            item.insert(TAG.to_owned(), string(&row.tag));
            item.insert(IDEA_ID.to_owned(), string(row.idea_id.as_str()));
            item.insert(USER_ID.to_owned(), string(row.user_id.as_str()));
            let put = PutRequest::builder()
                .set_item(Some(item))
                .build()
                .map_err(|e| build_error(&e))?;
            WriteRequest::builder().put_request(put).build()
        }
        TagWrite::Delete(key) => {
            let mut item_key = Item::new();
            item_key.insert(TAG.to_owned(), string(&key.tag));
            item_key.insert(IDEA_ID.to_owned(), string(key.idea_id.as_str()));
            let delete = DeleteRequest::builder()
                .set_key(Some(item_key))
                .build()
                .map_err(|e| build_error(&e))?;
            WriteRequest::builder().delete_request(delete).build()
        }
    };
    Ok(request)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ideas_core::{IdeaId, IdeaKey, TagKey, TagRow, UserId};

    use super::*;

    fn sample_idea() -> Idea {
        let mut idea = Idea::new(&IdeaKey::new("i1", "u1"));
        idea.title = "My Idea".into();
        idea.slug = "my-idea".into();
        idea.content = Some("<p>Hi</p>".into());
        idea.stripped_content = Some("Hi".into());
        idea.updated_date = Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        idea.image_attachments = AttachmentSet::from_keys(["a.png", "b.png"]);
        idea.preview_image = Some("a.png".into());
        idea.visibility = Visibility::Private;
        idea
    }

    #[test]
    fn empty_values_are_written_as_null() {
        let item = idea_to_item(&Idea::new(&IdeaKey::new("i1", "u1")));
        assert_eq!(item.get(CONTENT), Some(&AttributeValue::Null(true)));
        assert_eq!(item.get(FILE_ATTACHMENTS), Some(&AttributeValue::Null(true)));
        assert_eq!(item.get(PREVIEW_IMAGE), Some(&AttributeValue::Null(true)));
        assert_eq!(item.get(VISIBILITY), Some(&string("PUBLIC")));
    }

    #[test]
    fn attachments_are_written_as_string_sets() {
        let item = idea_to_item(&sample_idea());
        assert_eq!(
            item.get(IMAGE_ATTACHMENTS),
            Some(&AttributeValue::Ss(vec!["a.png".into(), "b.png".into()]))
        );
    }

    #[test]
    fn item_conversion_preserves_fields() {
        let idea = sample_idea();
        let restored = item_to_idea(&idea_to_item(&idea)).unwrap();
        assert_eq!(restored, idea);
    }

    #[test]
    fn missing_and_null_attributes_read_as_empty() {
        let mut item = Item::new();
        item.insert(IDEA_ID.into(), string("i1"));
        item.insert(USER_ID.into(), string("u1"));
        item.insert(FILE_ATTACHMENTS.into(), AttributeValue::Null(true));

        let idea = item_to_idea(&item).unwrap();
        assert!(idea.file_attachments.is_empty());
        assert!(idea.image_attachments.is_empty());
        assert!(idea.content.is_none());
        assert_eq!(idea.visibility, Visibility::Public);
    }

    #[test]
    fn list_attachments_are_accepted() {
        let mut item = Item::new();
        item.insert(IDEA_ID.into(), string("i1"));
        item.insert(USER_ID.into(), string("u1"));
        item.insert(
            FILE_ATTACHMENTS.into(),
            AttributeValue::L(vec![string("x.pdf"), string("y.pdf")]),
        );
        let idea = item_to_idea(&item).unwrap();
        assert_eq!(idea.file_attachments.as_slice(), ["x.pdf", "y.pdf"]);
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let mut item = Item::new();
        item.insert(IDEA_ID.into(), string("i1"));
        item.insert(USER_ID.into(), string("u1"));
        item.insert(UPDATED_DATE.into(), string("2023-01-02T03:04:05.123456"));
        let idea = item_to_idea(&item).unwrap();
        let date = idea.updated_date.unwrap();
        assert_eq!(date.timestamp(), 1_672_628_645);
    }

    #[test]
    fn item_without_key_is_rejected() {
        let mut item = Item::new();
        item.insert(TITLE.into(), string("orphan"));
        assert!(matches!(
            item_to_idea(&item),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn update_expression_names_every_attribute() {
        let update = IdeaUpdate::new(
            "T".into(),
            "t".into(),
            None,
            None,
            Utc::now(),
            AttachmentSet::new(),
            AttachmentSet::new(),
            Visibility::Public,
        );
        let values = update_values(&update);
        let expression = update_expression(&values);
        assert!(expression.starts_with("SET #title = :title, #slug = :slug"));
        assert!(expression.ends_with("#visibility = :visibility"));
        assert_eq!(values.len(), 9);
        assert!(
            values
                .iter()
                .any(|(n, v)| *n == PREVIEW_IMAGE && *v == AttributeValue::Null(true))
        );
    }

    #[test]
    fn tag_requests_use_row_keys() {
        let put = tag_write_request(&TagWrite::Put(TagRow {
            tag: "rust".into(),
            idea_id: IdeaId::new("i1"),
            user_id: UserId::new("u1"),
        }))
        .unwrap();
        let item = put.put_request().unwrap().item();
        assert_eq!(item.get(TAG), Some(&string("rust")));
        assert_eq!(item.get(USER_ID), Some(&string("u1")));

        let delete = tag_write_request(&TagWrite::Delete(TagKey {
            tag: "rust".into(),
            idea_id: IdeaId::new("i1"),
        }))
        .unwrap();
        let key = delete.delete_request().unwrap().key();
        assert_eq!(key.len(), 2);
        assert_eq!(key.get(IDEA_ID), Some(&string("i1")));
    }
}
