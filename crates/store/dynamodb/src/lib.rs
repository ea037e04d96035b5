mod config;
mod idea;
mod item;
mod tag;
mod table;

pub use config::DynamoConfig;
pub use idea::DynamoIdeaStore;
pub use tag::DynamoTagIndex;
pub use table::{create_ideas_table, create_tags_table};

use ideas_aws::{AwsConfig, build_sdk_config};

/// Build a `DynamoDB` client with its own SDK configuration.
///
/// Prefer creating the client from a shared `SdkConfig` when the process
/// also talks to other AWS services.
pub async fn build_client(aws: &AwsConfig) -> aws_sdk_dynamodb::Client {
    let sdk_config = build_sdk_config(aws).await;
    aws_sdk_dynamodb::Client::new(&sdk_config)
}
