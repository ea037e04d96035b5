/// Table layout of the ideas and tags tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoConfig {
    /// Ideas table, keyed by `ideaId` (hash) and `userId` (range).
    pub ideas_table: String,

    /// Tag association table, keyed by `tag` (hash) and `ideaId` (range).
    pub tags_table: String,

    /// Secondary index on the tags table keyed by `ideaId`.
    pub tags_index: String,
}

impl Default for DynamoConfig {
    fn default() -> Self {
        Self {
            ideas_table: String::from("ideas"),
            tags_table: String::from("tags"),
            tags_index: String::from("ideaTags"),
        }
    }
}
