use aws_sdk_s3::error::DisplayErrorContext;
use thiserror::Error;

use ideas_store::StoreError;

/// Failure classes of an AWS SDK call.
#[derive(Debug, Error)]
pub enum AwsError {
    /// The service rejected or failed the request.
    #[error("AWS service error: {0}")]
    Service(String),

    #[error("AWS request throttled")]
    Throttled,

    #[error("AWS connection error: {0}")]
    Connection(String),

    #[error("AWS request timed out")]
    Timeout,
}

impl From<AwsError> for StoreError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::Service(msg) => StoreError::Backend(msg),
            AwsError::Throttled => StoreError::Throttled,
            AwsError::Connection(msg) => StoreError::Connection(msg),
            AwsError::Timeout => StoreError::Timeout,
        }
    }
}

/// Classify a rendered SDK error message by its wording.
pub fn classify_sdk_error(error_str: &str) -> AwsError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl")
        || lower.contains("rate exceed")
        || lower.contains("too many")
        || lower.contains("provisionedthroughputexceeded")
    {
        AwsError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        AwsError::Timeout
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        AwsError::Connection(error_str.to_owned())
    } else {
        AwsError::Service(error_str.to_owned())
    }
}

/// Convert any SDK error into a [`StoreError`], rendering its full source
/// chain first so the classification sees the service's error code.
pub fn to_store_error<E: std::error::Error>(err: &E) -> StoreError {
    classify_sdk_error(&DisplayErrorContext(err).to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttled_maps_to_store_throttled() {
        let err: StoreError = AwsError::Throttled.into();
        assert!(matches!(err, StoreError::Throttled));
    }

    #[test]
    fn service_maps_to_backend() {
        let err: StoreError = AwsError::Service("NoSuchBucket".into()).into();
        assert!(matches!(err, StoreError::Backend(msg) if msg == "NoSuchBucket"));
    }

    #[test]
    fn classify_throttled() {
        assert!(matches!(
            classify_sdk_error("Throttling: Rate exceeded"),
            AwsError::Throttled
        ));
        assert!(matches!(
            classify_sdk_error("ProvisionedThroughputExceededException: slow down"),
            AwsError::Throttled
        ));
    }

    #[test]
    fn classify_timeout() {
        assert!(matches!(
            classify_sdk_error("request timed out after 30s"),
            AwsError::Timeout
        ));
    }

    #[test]
    fn classify_connection() {
        assert!(matches!(
            classify_sdk_error("Connection refused: localhost:8000"),
            AwsError::Connection(_)
        ));
    }

    #[test]
    fn classify_other_service_error() {
        assert!(matches!(
            classify_sdk_error("ResourceNotFoundException: table missing"),
            AwsError::Service(_)
        ));
    }

    #[test]
    fn to_store_error_renders_sources() {
        let io = std::io::Error::other("read: connection reset by peer");
        assert!(matches!(to_store_error(&io), StoreError::Connection(_)));
    }
}
