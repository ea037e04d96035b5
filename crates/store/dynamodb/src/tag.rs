use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use tracing::{debug, instrument, warn};

use ideas_aws::to_store_error;
use ideas_core::{BATCH_WRITE_CHUNK_SIZE, IdeaId, TagWrite};
use ideas_store::{StoreError, TagIndex};

use crate::config::DynamoConfig;
use crate::item::{self, IDEA_ID, Item, TAG};

/// `DynamoDB`-backed [`TagIndex`].
///
/// Rows are read through the `ideaId` secondary index and written with
/// `BatchWriteItem`.
pub struct DynamoTagIndex {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DynamoTagIndex {
    pub fn from_client(client: Client, config: &DynamoConfig) -> Self {
        Self {
            client,
            table_name: config.tags_table.clone(),
            index_name: config.tags_index.clone(),
        }
    }
}

impl std::fmt::Debug for DynamoTagIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoTagIndex")
            .field("table_name", &self.table_name)
            .field("index_name", &self.index_name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TagIndex for DynamoTagIndex {
    #[instrument(skip(self), fields(index = %self.index_name))]
    async fn tags_for_idea(&self, idea_id: &IdeaId) -> Result<Vec<String>, StoreError> {
        let mut tags = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(&self.index_name)
                .key_condition_expression(format!("#{IDEA_ID} = :{IDEA_ID}"))
                .expression_attribute_names(format!("#{IDEA_ID}"), IDEA_ID)
                .expression_attribute_names(format!("#{TAG}"), TAG)
                .expression_attribute_values(format!(":{IDEA_ID}"), item::string(idea_id.as_str()))
                .projection_expression(format!("#{TAG}"))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| to_store_error(&e))?;

            tags.extend(
                output
                    .items()
                    .iter()
                    .filter_map(|row| row.get(TAG)?.as_s().ok().cloned()),
            );

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!(count = tags.len(), "loaded existing tags");
        Ok(tags)
    }

    #[instrument(skip(self, writes), fields(table = %self.table_name, writes = writes.len()))]
    async fn write_batch(&self, writes: &[TagWrite]) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }
        if writes.len() > BATCH_WRITE_CHUNK_SIZE {
            return Err(StoreError::Backend(format!(
                "batch of {} writes exceeds the limit of {BATCH_WRITE_CHUNK_SIZE}",
                writes.len()
            )));
        }

        let requests = writes
            .iter()
            .map(item::tag_write_request)
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, requests)
            .send()
            .await
            .map_err(|e| to_store_error(&e))?;

        let unprocessed = output
            .unprocessed_items()
            .and_then(|items| items.get(&self.table_name))
            .map_or(0, Vec::len);
        if unprocessed > 0 {
            warn!(unprocessed, "batch write left items unprocessed");
            return Err(StoreError::Backend(format!(
                "{unprocessed} of {} tag writes were not processed",
                writes.len()
            )));
        }

        Ok(())
    }
}
