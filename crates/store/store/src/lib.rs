pub mod attachment;
pub mod error;
pub mod idea;
pub mod tag;
pub mod testing;

pub use attachment::AttachmentStore;
pub use error::StoreError;
pub use idea::IdeaStore;
pub use tag::TagIndex;
