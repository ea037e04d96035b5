use serde::Deserialize;

use ideas_store_dynamodb::DynamoConfig;

/// Which store implementations the handler runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `DynamoDB` tables and an S3 uploads bucket.
    #[default]
    Dynamodb,
    /// Process-local maps. Data is lost on exit.
    Memory,
}

/// Table and bucket names.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Ideas table (`IDEAS_TABLE_NAME`).
    #[serde(default = "default_ideas_table")]
    pub ideas_table: String,

    /// Tag association table (`TAGS_TABLE_NAME`).
    #[serde(default = "default_tags_table")]
    pub tags_table: String,

    /// Secondary index on the tags table keyed by idea id.
    #[serde(default = "default_tags_index")]
    pub tags_index: String,

    /// Bucket holding user uploads (`USER_UPLOADS_BUCKET`).
    #[serde(default)]
    pub uploads_bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            ideas_table: default_ideas_table(),
            tags_table: default_tags_table(),
            tags_index: default_tags_index(),
            uploads_bucket: String::new(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn dynamo_config(&self) -> DynamoConfig {
        DynamoConfig {
            ideas_table: self.ideas_table.clone(),
            tags_table: self.tags_table.clone(),
            tags_index: self.tags_index.clone(),
        }
    }
}

fn default_ideas_table() -> String {
    "ideas".to_owned()
}

fn default_tags_table() -> String {
    "tags".to_owned()
}

fn default_tags_index() -> String {
    "ideaTags".to_owned()
}
