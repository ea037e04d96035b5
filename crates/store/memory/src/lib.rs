mod attachment;
mod idea;
mod tag;

pub use attachment::MemoryAttachmentStore;
pub use idea::MemoryIdeaStore;
pub use tag::MemoryTagIndex;
