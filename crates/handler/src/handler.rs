//! The update-idea operation.
//!
//! One call validates the request, rewrites the idea record, removes file
//! attachments that are no longer referenced, and replaces the idea's tag
//! rows. The steps are not transactional. Each one is idempotent, so
//! repeating a request converges on the same state.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use ideas_core::{
    AttachmentSet, BATCH_WRITE_CHUNK_SIZE, ContentSanitizer, IdeaId, IdeaKey, IdeaRef, IdeaUpdate,
    Identity, InvocationEvent, MAX_TAGS, TagWrite, UpdateIdeaArguments, UpdateIdeaResponse, UserId,
    Visibility, delete_requests, put_requests, slugify,
};
use ideas_store::{AttachmentStore, IdeaStore, StoreError, TagIndex};

use crate::error::UpdateIdeaError;

/// Handles update-idea invocations against injected stores.
///
/// Stores are shared handles built once per process.
pub struct UpdateIdeaHandler {
    ideas: Arc<dyn IdeaStore>,
    tags: Arc<dyn TagIndex>,
    attachments: Arc<dyn AttachmentStore>,
    sanitizer: ContentSanitizer,
}

impl fmt::Debug for UpdateIdeaHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateIdeaHandler").finish_non_exhaustive()
    }
}

impl UpdateIdeaHandler {
    pub fn new(
        ideas: Arc<dyn IdeaStore>,
        tags: Arc<dyn TagIndex>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            ideas,
            tags,
            attachments,
            sanitizer: ContentSanitizer::new(),
        }
    }

    /// Decode a raw invocation event and handle it.
    pub async fn handle_event(&self, event: serde_json::Value) -> UpdateIdeaResponse {
        match serde_json::from_value::<InvocationEvent>(event) {
            Ok(event) => self.handle(event).await,
            Err(err) => into_response(Err(UpdateIdeaError::InvalidRequest(err.to_string()))),
        }
    }

    /// Handle a decoded invocation event. Failures are reported in the
    /// response, never as a panic.
    pub async fn handle(&self, event: InvocationEvent) -> UpdateIdeaResponse {
        let ctx = event.ctx;
        into_response(self.update(ctx.identity.as_ref(), &ctx.arguments).await)
    }

    /// Run the update for `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateIdeaError::Permission`] or
    /// [`UpdateIdeaError::Validation`] before any store call,
    /// [`UpdateIdeaError::NotFound`] if the idea does not exist, and
    /// [`UpdateIdeaError::Dependency`] if a store call fails.
    #[instrument(
        skip_all,
        fields(idea_id = %args.idea_id, owner = %args.idea_owner_id)
    )]
    pub async fn update(
        &self,
        identity: Option<&Identity>,
        args: &UpdateIdeaArguments,
    ) -> Result<IdeaRef, UpdateIdeaError> {
        authorize(identity, &args.idea_owner_id)?;
        validate(args)?;

        let key = IdeaKey::new(args.idea_id.clone(), args.idea_owner_id.clone());
        let update = self.derive_update(args);

        let current = self
            .ideas
            .get(&key)
            .await?
            .ok_or_else(|| not_found(&args.idea_id))?;

        self.ideas
            .update(&key, &update)
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    not_found(&args.idea_id)
                } else {
                    UpdateIdeaError::Dependency(err)
                }
            })?;
        debug!(slug = %update.slug, "idea record written");

        self.collect_removed_files(&current.file_attachments, &update.file_attachments)
            .await;
        self.replace_tags(&args.idea_id, &args.idea_owner_id, args.tags())
            .await?;

        info!(slug = %update.slug, "idea updated");
        Ok(IdeaRef {
            idea_id: args.idea_id.clone(),
            slug: update.slug,
        })
    }

    fn derive_update(&self, args: &UpdateIdeaArguments) -> IdeaUpdate {
        let content = self.sanitizer.prepare(args.content.as_deref());
        IdeaUpdate::new(
            args.title.clone(),
            slugify(&args.title),
            content.html,
            content.text,
            Utc::now(),
            AttachmentSet::from_keys(args.file_attachments().iter().cloned()),
            AttachmentSet::from_keys(args.image_attachments().iter().cloned()),
            Visibility::from_private_flag(args.is_private()),
        )
    }

    /// Delete uploads that the previous version referenced and the new one
    /// does not. Failures are logged and skipped.
    async fn collect_removed_files(&self, previous: &AttachmentSet, current: &AttachmentSet) {
        for key in previous.difference(current) {
            match self.attachments.delete(key).await {
                Ok(()) => debug!(key, "removed unreferenced attachment"),
                Err(err) => warn!(key, error = %err, "failed to remove attachment"),
            }
        }
    }

    /// Delete every existing tag row of the idea, then insert the new ones.
    async fn replace_tags(
        &self,
        idea_id: &IdeaId,
        owner: &UserId,
        tags: &[String],
    ) -> Result<(), UpdateIdeaError> {
        let existing = self.tags.tags_for_idea(idea_id).await?;
        if !existing.is_empty() {
            self.write_in_chunks(&delete_requests(&existing, idea_id))
                .await?;
        }
        if !tags.is_empty() {
            self.write_in_chunks(&put_requests(tags, owner, idea_id))
                .await?;
        }
        debug!(removed = existing.len(), added = tags.len(), "tags replaced");
        Ok(())
    }

    async fn write_in_chunks(&self, writes: &[TagWrite]) -> Result<(), StoreError> {
        for chunk in writes.chunks(BATCH_WRITE_CHUNK_SIZE) {
            self.tags.write_batch(chunk).await?;
        }
        Ok(())
    }
}

fn authorize(identity: Option<&Identity>, owner: &UserId) -> Result<(), UpdateIdeaError> {
    match identity {
        Some(identity) if identity.username == owner.as_str() => Ok(()),
        _ => Err(UpdateIdeaError::Permission),
    }
}

fn validate(args: &UpdateIdeaArguments) -> Result<(), UpdateIdeaError> {
    if args.tags().len() > MAX_TAGS {
        return Err(UpdateIdeaError::Validation("Too much tags".to_owned()));
    }
    if args.title.trim().is_empty() {
        return Err(UpdateIdeaError::Validation("Title is required".to_owned()));
    }
    if args.tags().iter().any(|tag| tag.trim().is_empty()) {
        return Err(UpdateIdeaError::Validation(
            "Tags must not be empty".to_owned(),
        ));
    }
    Ok(())
}

fn not_found(idea_id: &IdeaId) -> UpdateIdeaError {
    UpdateIdeaError::NotFound {
        idea_id: idea_id.clone(),
    }
}

fn into_response(result: Result<IdeaRef, UpdateIdeaError>) -> UpdateIdeaResponse {
    match result {
        Ok(idea) => UpdateIdeaResponse::success(idea.idea_id, idea.slug),
        Err(err) => {
            if err.is_caller_error() {
                warn!(error = %err, "update rejected");
            } else {
                error!(error = %err, "update failed");
            }
            UpdateIdeaResponse::failure(err.public_message())
        }
    }
}
