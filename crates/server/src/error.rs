use thiserror::Error;

use ideas_store::StoreError;

/// Errors that can occur when starting or running the ideas server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener or reading an event file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An event or response could not be encoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A store call made outside the handler failed (e.g. table creation).
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
