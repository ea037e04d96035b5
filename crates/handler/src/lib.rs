pub mod error;
pub mod handler;

pub use error::UpdateIdeaError;
pub use handler::UpdateIdeaHandler;
