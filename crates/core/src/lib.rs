//! Core types and pure helpers for the idea update service.
//!
//! Nothing in this crate performs I/O: storage seams live in `ideas-store`,
//! orchestration in `ideas-handler`.

pub mod attachment;
pub mod content;
pub mod idea;
pub mod invocation;
pub mod slug;
pub mod tag;
pub mod types;

pub use attachment::AttachmentSet;
pub use content::{ContentSanitizer, SanitizedContent};
pub use idea::{Idea, IdeaKey, IdeaUpdate, Visibility};
pub use invocation::{
    Identity, IdeaRef, InvocationContext, InvocationEvent, ResultStatus, UpdateIdeaArguments,
    UpdateIdeaResponse,
};
pub use slug::slugify;
pub use tag::{
    BATCH_WRITE_CHUNK_SIZE, MAX_TAGS, TagKey, TagRow, TagWrite, delete_requests, put_requests,
};
pub use types::{IdeaId, UserId};
