use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use tracing::{debug, instrument};

use ideas_aws::to_store_error;
use ideas_core::{Idea, IdeaKey, IdeaUpdate};
use ideas_store::{IdeaStore, StoreError};

use crate::config::DynamoConfig;
use crate::item::{self, IDEA_ID, USER_ID};

/// `DynamoDB`-backed [`IdeaStore`].
///
/// Updates are conditional on the record existing, so a stale key never
/// creates a partial idea.
pub struct DynamoIdeaStore {
    client: Client,
    table_name: String,
}

impl DynamoIdeaStore {
    pub fn from_client(client: Client, config: &DynamoConfig) -> Self {
        Self {
            client,
            table_name: config.ideas_table.clone(),
        }
    }
}

impl std::fmt::Debug for DynamoIdeaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoIdeaStore")
            .field("table_name", &self.table_name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdeaStore for DynamoIdeaStore {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn get(&self, key: &IdeaKey) -> Result<Option<Idea>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(IDEA_ID, item::string(key.idea_id.as_str()))
            .key(USER_ID, item::string(key.user_id.as_str()))
            .send()
            .await
            .map_err(|e| to_store_error(&e))?;

        output.item().map(item::item_to_idea).transpose()
    }

    #[instrument(skip(self, update), fields(table = %self.table_name))]
    async fn update(&self, key: &IdeaKey, update: &IdeaUpdate) -> Result<(), StoreError> {
        let values = item::update_values(update);
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(IDEA_ID, item::string(key.idea_id.as_str()))
            .key(USER_ID, item::string(key.user_id.as_str()))
            .update_expression(item::update_expression(&values))
            .condition_expression(format!("attribute_exists({IDEA_ID})"));

        for (name, value) in values {
            request = request
                .expression_attribute_names(format!("#{name}"), name)
                .expression_attribute_values(format!(":{name}"), value);
        }

        request.send().await.map_err(|err| {
            if err
                .as_service_error()
                .is_some_and(UpdateItemError::is_conditional_check_failed_exception)
            {
                StoreError::NotFound(key.to_string())
            } else {
                to_store_error(&err)
            }
        })?;

        debug!("idea record updated");
        Ok(())
    }

    async fn put(&self, idea: &Idea) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item::idea_to_item(idea)))
            .send()
            .await
            .map_err(|e| to_store_error(&e))?;
        Ok(())
    }
}

#[cfg(all(test, feature = "integration"))]
mod integration {
    use ideas_aws::AwsConfig;
    use ideas_store::testing::run_idea_store_conformance_tests;

    use super::*;
    use crate::table::create_ideas_table;

    async fn store() -> DynamoIdeaStore {
        let endpoint =
            std::env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8000".into());
        let aws = AwsConfig::new("us-east-1").with_endpoint_url(endpoint);
        let client = crate::build_client(&aws).await;
        let config = DynamoConfig {
            ideas_table: "ideas_integration".into(),
            ..DynamoConfig::default()
        };
        create_ideas_table(&client, &config.ideas_table)
            .await
            .expect("table creation should succeed");
        DynamoIdeaStore::from_client(client, &config)
    }

    #[tokio::test]
    async fn dynamo_idea_store_conformance() {
        let store = store().await;
        let namespace = uuid::Uuid::new_v4().to_string();
        run_idea_store_conformance_tests(&store, &namespace)
            .await
            .expect("conformance tests should pass");
    }
}
