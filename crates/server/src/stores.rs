//! Store construction for the configured backend.

use std::sync::Arc;

use tracing::info;

use ideas_aws::{S3AttachmentStore, build_sdk_config};
use ideas_handler::UpdateIdeaHandler;
use ideas_store_dynamodb::{
    DynamoIdeaStore, DynamoTagIndex, create_ideas_table, create_tags_table,
};
use ideas_store_memory::{MemoryAttachmentStore, MemoryIdeaStore, MemoryTagIndex};

use crate::config::{IdeasConfig, StorageBackend};
use crate::error::ServerError;

/// Build the handler with stores for `config.storage.backend`.
///
/// AWS clients share one SDK configuration and are created once here.
pub async fn create_handler(config: &IdeasConfig) -> UpdateIdeaHandler {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("using in-memory stores");
            UpdateIdeaHandler::new(
                Arc::new(MemoryIdeaStore::new()),
                Arc::new(MemoryTagIndex::new()),
                Arc::new(MemoryAttachmentStore::new()),
            )
        }
        StorageBackend::Dynamodb => {
            let sdk_config = build_sdk_config(&config.aws).await;
            let dynamo_config = config.storage.dynamo_config();
            let client = aws_sdk_dynamodb::Client::new(&sdk_config);

            let ideas = DynamoIdeaStore::from_client(client.clone(), &dynamo_config);
            let tags = DynamoTagIndex::from_client(client, &dynamo_config);
            let attachments =
                S3AttachmentStore::from_sdk_config(&sdk_config, &config.storage.uploads_bucket);

            info!(
                region = %config.aws.region,
                ideas_table = %dynamo_config.ideas_table,
                tags_table = %dynamo_config.tags_table,
                bucket = %config.storage.uploads_bucket,
                "using DynamoDB and S3 stores"
            );
            UpdateIdeaHandler::new(Arc::new(ideas), Arc::new(tags), Arc::new(attachments))
        }
    }
}

/// Create the ideas and tags tables if they do not exist.
///
/// # Errors
///
/// Returns an error if table creation fails.
pub async fn migrate(config: &IdeasConfig) -> Result<(), ServerError> {
    if config.storage.backend == StorageBackend::Memory {
        info!("memory backend has no tables to create");
        return Ok(());
    }

    let sdk_config = build_sdk_config(&config.aws).await;
    let client = aws_sdk_dynamodb::Client::new(&sdk_config);
    let storage = &config.storage;

    create_ideas_table(&client, &storage.ideas_table).await?;
    info!(table = %storage.ideas_table, "ideas table ready");
    create_tags_table(&client, &storage.tags_table, &storage.tags_index).await?;
    info!(table = %storage.tags_table, index = %storage.tags_index, "tags table ready");
    Ok(())
}
