use serde::{Deserialize, Serialize};

/// AWS settings shared by the `DynamoDB` and S3 clients.
///
/// One [`SdkConfig`](aws_config::SdkConfig) is built from this per process
/// and every client is created from it.
#[derive(Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// AWS region (e.g. `"us-east-1"`).
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint override for local development (`DynamoDB` Local, `LocalStack`).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// IAM role to assume via STS before talking to AWS.
    #[serde(default)]
    pub role_arn: Option<String>,

    /// STS session name (defaults to `"ideas-update"`).
    #[serde(default)]
    pub session_name: Option<String>,

    /// External ID required by the role's trust policy, if any.
    #[serde(default)]
    pub external_id: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_owned()
}

impl std::fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsConfig")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("role_arn", &self.role_arn.as_ref().map(|_| "[REDACTED]"))
            .field("session_name", &self.session_name)
            .field("external_id", &self.external_id.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            role_arn: None,
            session_name: None,
            external_id: None,
        }
    }
}

impl AwsConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    /// Override fields from `AWS_REGION` and `AWS_ENDPOINT_URL` as returned
    /// by `lookup`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(region) = non_empty("AWS_REGION") {
            self.region = region;
        }
        if let Some(endpoint) = non_empty("AWS_ENDPOINT_URL") {
            self.endpoint_url = Some(endpoint);
        }
    }
}
