//! Backend conformance suites.
//!
//! Each backend's test module calls these with a fresh store. `namespace`
//! prefixes every identifier so suites can share a table.

use chrono::Utc;

use ideas_core::{
    AttachmentSet, Idea, IdeaId, IdeaKey, IdeaUpdate, UserId, Visibility, delete_requests,
    put_requests,
};

use crate::error::StoreError;
use crate::idea::IdeaStore;
use crate::tag::TagIndex;

fn key(namespace: &str, idea: &str) -> IdeaKey {
    IdeaKey::new(format!("{namespace}-{idea}"), format!("{namespace}-owner"))
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_owned()).collect()
}

fn sample_update() -> IdeaUpdate {
    IdeaUpdate::new(
        "Updated title".to_owned(),
        "updated-title".to_owned(),
        Some("<p>Body</p>".to_owned()),
        Some("Body".to_owned()),
        Utc::now(),
        AttachmentSet::from_keys(["doc.pdf"]),
        AttachmentSet::from_keys(["a.png", "b.png"]),
        Visibility::Private,
    )
}

/// Run the idea store conformance suite.
///
/// # Errors
///
/// Returns an error if a backend call fails; assertion failures panic.
pub async fn run_idea_store_conformance_tests(
    store: &dyn IdeaStore,
    namespace: &str,
) -> Result<(), StoreError> {
    test_get_missing(store, namespace).await?;
    test_update_missing(store, namespace).await?;
    test_put_and_get(store, namespace).await?;
    test_update_applies_fields(store, namespace).await?;
    test_update_clears_to_null(store, namespace).await?;
    Ok(())
}

async fn test_get_missing(store: &dyn IdeaStore, namespace: &str) -> Result<(), StoreError> {
    let found = store.get(&key(namespace, "missing")).await?;
    assert!(found.is_none(), "get on a missing idea should return None");
    Ok(())
}

async fn test_update_missing(store: &dyn IdeaStore, namespace: &str) -> Result<(), StoreError> {
    let missing = key(namespace, "never-created");
    let result = store.update(&missing, &sample_update()).await;
    assert!(
        matches!(result, Err(StoreError::NotFound(_))),
        "update on a missing idea should fail with NotFound, got {result:?}"
    );
    assert!(
        store.get(&missing).await?.is_none(),
        "update must not create a record"
    );
    Ok(())
}

async fn test_put_and_get(store: &dyn IdeaStore, namespace: &str) -> Result<(), StoreError> {
    let key = key(namespace, "put-get");
    let mut idea = Idea::new(&key);
    idea.title = "Original".to_owned();
    idea.slug = "original".to_owned();
    idea.file_attachments = AttachmentSet::from_keys(["x.pdf", "y.pdf"]);
    store.put(&idea).await?;

    let found = store.get(&key).await?.expect("idea should exist after put");
    assert_eq!(found.title, "Original");
    assert_eq!(found.file_attachments.len(), 2);
    assert!(found.file_attachments.contains("x.pdf"));
    assert!(found.image_attachments.is_empty());
    assert_eq!(found.visibility, Visibility::Public);
    Ok(())
}

async fn test_update_applies_fields(
    store: &dyn IdeaStore,
    namespace: &str,
) -> Result<(), StoreError> {
    let key = key(namespace, "update");
    store.put(&Idea::new(&key)).await?;

    let update = sample_update();
    store.update(&key, &update).await?;

    let found = store.get(&key).await?.expect("idea should still exist");
    assert_eq!(found.title, update.title);
    assert_eq!(found.slug, update.slug);
    assert_eq!(found.content, update.content);
    assert_eq!(found.stripped_content, update.stripped_content);
    assert_eq!(found.updated_date, Some(update.updated_date));
    assert_eq!(found.preview_image.as_deref(), Some("a.png"));
    assert_eq!(found.visibility, Visibility::Private);
    assert!(found.file_attachments.contains("doc.pdf"));
    assert_eq!(found.image_attachments.len(), 2);
    Ok(())
}

async fn test_update_clears_to_null(
    store: &dyn IdeaStore,
    namespace: &str,
) -> Result<(), StoreError> {
    let key = key(namespace, "clear");
    store.put(&Idea::new(&key)).await?;
    store.update(&key, &sample_update()).await?;

    let cleared = IdeaUpdate::new(
        "Bare".to_owned(),
        "bare".to_owned(),
        None,
        None,
        Utc::now(),
        AttachmentSet::new(),
        AttachmentSet::new(),
        Visibility::Public,
    );
    store.update(&key, &cleared).await?;

    let found = store.get(&key).await?.expect("idea should still exist");
    assert!(found.content.is_none());
    assert!(found.stripped_content.is_none());
    assert!(found.file_attachments.is_empty());
    assert!(found.image_attachments.is_empty());
    assert!(found.preview_image.is_none());
    Ok(())
}

/// Run the tag index conformance suite.
///
/// # Errors
///
/// Returns an error if a backend call fails; assertion failures panic.
pub async fn run_tag_index_conformance_tests(
    index: &dyn TagIndex,
    namespace: &str,
) -> Result<(), StoreError> {
    test_no_tags(index, namespace).await?;
    test_put_and_query(index, namespace).await?;
    test_delete(index, namespace).await?;
    test_full_batch(index, namespace).await?;
    Ok(())
}

async fn test_no_tags(index: &dyn TagIndex, namespace: &str) -> Result<(), StoreError> {
    let found = index
        .tags_for_idea(&IdeaId::new(format!("{namespace}-untagged")))
        .await?;
    assert!(found.is_empty(), "untagged idea should have no rows");
    Ok(())
}

async fn test_put_and_query(index: &dyn TagIndex, namespace: &str) -> Result<(), StoreError> {
    let owner = UserId::new(format!("{namespace}-owner"));
    let idea = IdeaId::new(format!("{namespace}-tagged"));
    let other = IdeaId::new(format!("{namespace}-other"));

    index
        .write_batch(&put_requests(&tags(&["a", "b"]), &owner, &idea))
        .await?;
    index
        .write_batch(&put_requests(&tags(&["a", "z"]), &owner, &other))
        .await?;

    let mut found = index.tags_for_idea(&idea).await?;
    found.sort();
    assert_eq!(found, ["a", "b"], "query should only return this idea's rows");
    Ok(())
}

async fn test_delete(index: &dyn TagIndex, namespace: &str) -> Result<(), StoreError> {
    let owner = UserId::new(format!("{namespace}-owner"));
    let idea = IdeaId::new(format!("{namespace}-deleted"));
    let other = IdeaId::new(format!("{namespace}-kept"));

    index
        .write_batch(&put_requests(&tags(&["a", "b", "c"]), &owner, &idea))
        .await?;
    index
        .write_batch(&put_requests(&tags(&["a"]), &owner, &other))
        .await?;
    index
        .write_batch(&delete_requests(&tags(&["a", "b"]), &idea))
        .await?;

    assert_eq!(index.tags_for_idea(&idea).await?, ["c"]);
    assert_eq!(
        index.tags_for_idea(&other).await?,
        ["a"],
        "deleting (a, idea) must not touch (a, other)"
    );
    Ok(())
}

async fn test_full_batch(index: &dyn TagIndex, namespace: &str) -> Result<(), StoreError> {
    let owner = UserId::new(format!("{namespace}-owner"));
    let idea = IdeaId::new(format!("{namespace}-full"));
    let many: Vec<String> = (0..ideas_core::BATCH_WRITE_CHUNK_SIZE)
        .map(|i| format!("tag-{i:02}"))
        .collect();

    index
        .write_batch(&put_requests(&many, &owner, &idea))
        .await?;

    let found = index.tags_for_idea(&idea).await?;
    assert_eq!(found.len(), ideas_core::BATCH_WRITE_CHUNK_SIZE);
    Ok(())
}
