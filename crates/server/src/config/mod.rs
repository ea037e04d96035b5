mod logging;
mod server;
mod storage;

#[cfg(test)]
mod tests;

pub use logging::*;
pub use server::*;
pub use storage::*;

use std::path::Path;

use ideas_aws::AwsConfig;
use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration, loaded from a TOML file and overlaid with
/// environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdeasConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IdeasConfig {
    /// Parse a TOML document. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the document is not valid.
    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load `path` if it exists, otherwise start from the defaults. Returns
    /// the configuration and whether the file was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<(Self, bool), ServerError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok((Self::from_toml(&contents)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Overlay values from the process environment.
    pub fn apply_process_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    /// Overlay `IDEAS_TABLE_NAME`, `TAGS_TABLE_NAME`, `USER_UPLOADS_BUCKET`
    /// and the AWS variables as returned by `lookup`. Empty values are
    /// ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(table) = non_empty("IDEAS_TABLE_NAME") {
            self.storage.ideas_table = table;
        }
        if let Some(table) = non_empty("TAGS_TABLE_NAME") {
            self.storage.tags_table = table;
        }
        if let Some(bucket) = non_empty("USER_UPLOADS_BUCKET") {
            self.storage.uploads_bucket = bucket;
        }
        self.aws.apply_env(&lookup);
    }

    /// Check the settings the selected backend needs.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] naming the first missing setting.
    pub fn validate(&self) -> Result<(), ServerError> {
        let required = [
            ("storage.ideas_table", &self.storage.ideas_table),
            ("storage.tags_table", &self.storage.tags_table),
            ("storage.tags_index", &self.storage.tags_index),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ServerError::Config(format!("{name} must not be empty")));
            }
        }
        if self.storage.backend == StorageBackend::Dynamodb
            && self.storage.uploads_bucket.trim().is_empty()
        {
            return Err(ServerError::Config(
                "storage.uploads_bucket (USER_UPLOADS_BUCKET) is required for the dynamodb backend"
                    .to_owned(),
            ));
        }
        if self.aws.region.trim().is_empty() {
            return Err(ServerError::Config("aws.region must not be empty".to_owned()));
        }
        Ok(())
    }
}
