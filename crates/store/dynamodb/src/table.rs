use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection,
    ProjectionType, ScalarAttributeType,
};

use ideas_aws::to_store_error;
use ideas_store::StoreError;

use crate::item::{IDEA_ID, TAG, USER_ID};

fn key(attribute: &str, key_type: KeyType) -> Result<KeySchemaElement, StoreError> {
    KeySchemaElement::builder()
        .attribute_name(attribute)
        .key_type(key_type)
        .build()
        .map_err(|e| schema_error(&e))
}

fn string_attribute(attribute: &str) -> Result<AttributeDefinition, StoreError> {
    AttributeDefinition::builder()
        .attribute_name(attribute)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| schema_error(&e))
}

fn schema_error(err: &BuildError) -> StoreError {
    StoreError::Backend(format!("invalid table schema: {err}"))
}

/// Create the ideas table: `ideaId` hash key, `userId` range key.
///
/// Intended for local development and tests; an existing table is left as is.
///
/// # Errors
///
/// Returns an error if `CreateTable` fails for a reason other than the table
/// already existing.
pub async fn create_ideas_table(client: &Client, table_name: &str) -> Result<(), StoreError> {
    let result = client
        .create_table()
        .table_name(table_name)
        .billing_mode(BillingMode::PayPerRequest)
        .key_schema(key(IDEA_ID, KeyType::Hash)?)
        .key_schema(key(USER_ID, KeyType::Range)?)
        .attribute_definitions(string_attribute(IDEA_ID)?)
        .attribute_definitions(string_attribute(USER_ID)?)
        .send()
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) => tolerate_existing(err.into_service_error()),
    }
}

/// Create the tags table: `tag` hash key, `ideaId` range key, plus a
/// keys-only secondary index named `index_name` keyed by `ideaId`.
///
/// # Errors
///
/// Returns an error if `CreateTable` fails for a reason other than the table
/// already existing.
pub async fn create_tags_table(
    client: &Client,
    table_name: &str,
    index_name: &str,
) -> Result<(), StoreError> {
    let by_idea = GlobalSecondaryIndex::builder()
        .index_name(index_name)
        .key_schema(key(IDEA_ID, KeyType::Hash)?)
        .projection(
            Projection::builder()
                .projection_type(ProjectionType::KeysOnly)
                .build(),
        )
        .build()
        .map_err(|e| schema_error(&e))?;

    let result = client
        .create_table()
        .table_name(table_name)
        .billing_mode(BillingMode::PayPerRequest)
        .key_schema(key(TAG, KeyType::Hash)?)
        .key_schema(key(IDEA_ID, KeyType::Range)?)
        .attribute_definitions(string_attribute(TAG)?)
        .attribute_definitions(string_attribute(IDEA_ID)?)
        .global_secondary_indexes(by_idea)
        .send()
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) => tolerate_existing(err.into_service_error()),
    }
}

fn tolerate_existing(
    err: aws_sdk_dynamodb::operation::create_table::CreateTableError,
) -> Result<(), StoreError> {
    if err.is_resource_in_use_exception() {
        Ok(())
    } else {
        Err(to_store_error(&err))
    }
}
