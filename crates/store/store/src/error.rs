use thiserror::Error;

/// Errors from idea, tag, and attachment storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("request throttled")]
    Throttled,

    #[error("operation timed out")]
    Timeout,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(StoreError::Throttled.to_string(), "request throttled");
        assert_eq!(
            StoreError::Backend("boom".into()).to_string(),
            "backend error: boom"
        );
    }

    #[test]
    fn not_found_predicate() {
        assert!(StoreError::NotFound("i1".into()).is_not_found());
        assert!(!StoreError::Timeout.is_not_found());
    }
}
