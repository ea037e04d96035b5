//! AWS plumbing for the idea update service.
//!
//! - [`AwsConfig`](config::AwsConfig): region, endpoint override, optional
//!   STS assume-role
//! - [`build_sdk_config`](auth::build_sdk_config): one `SdkConfig` per process
//! - [`error`]: SDK error classification into [`StoreError`](ideas_store::StoreError)
//! - [`S3AttachmentStore`](s3::S3AttachmentStore): attachment deletion

pub mod auth;
pub mod config;
pub mod error;
pub mod s3;

pub use auth::build_sdk_config;
pub use config::AwsConfig;
pub use error::{AwsError, classify_sdk_error, to_store_error};
pub use s3::S3AttachmentStore;
