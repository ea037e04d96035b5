use thiserror::Error;

use ideas_core::IdeaId;
use ideas_store::StoreError;

/// Reasons an update is refused or fails.
#[derive(Debug, Error)]
pub enum UpdateIdeaError {
    /// The invocation event could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The caller is not the owner of the idea.
    #[error("caller is not the owner of the idea")]
    Permission,

    /// The arguments break an input rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No idea with this id exists for the owner, or it was removed before
    /// the write landed.
    #[error("idea not found: {idea_id}")]
    NotFound { idea_id: IdeaId },

    /// A store or object-store call failed.
    #[error("dependency failure: {0}")]
    Dependency(#[from] StoreError),
}

impl UpdateIdeaError {
    /// Message returned to the caller in the failure response.
    ///
    /// Dependency failures are reported generically; their detail only goes
    /// to the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidRequest(detail) => format!("Invalid request: {detail}"),
            Self::Permission => "You do not have permission to edit this idea".to_owned(),
            Self::Validation(message) => message.clone(),
            Self::NotFound { .. } => "Idea not found".to_owned(),
            Self::Dependency(_) => "Unable to update idea".to_owned(),
        }
    }

    /// Whether the failure was caused by the request rather than by a
    /// dependency.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Dependency(_))
    }
}
