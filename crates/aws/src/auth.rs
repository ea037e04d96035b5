use tracing::{debug, info};

use crate::config::AwsConfig;

/// Build the process-wide AWS SDK configuration.
///
/// Uses the standard environment credential chain, applies the endpoint
/// override when set, and assumes `role_arn` through STS when configured
/// (the SDK refreshes those credentials before they expire).
pub async fn build_sdk_config(config: &AwsConfig) -> aws_config::SdkConfig {
    let region = aws_config::Region::new(config.region.clone());
    let mut loader = aws_config::from_env().region(region.clone());

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let Some(role_arn) = &config.role_arn else {
        return loader.load().await;
    };

    let session_name = config.session_name.as_deref().unwrap_or("ideas-update");
    info!(role_arn = %role_arn, session_name = %session_name, "assuming IAM role via STS");

    let base_config = loader.load().await;
    let mut provider = aws_config::sts::AssumeRoleProvider::builder(role_arn)
        .session_name(session_name)
        .region(region.clone());
    if let Some(external_id) = &config.external_id {
        provider = provider.external_id(external_id);
    }
    let provider = provider.configure(&base_config).build().await;

    let mut loader = aws_config::from_env()
        .region(region)
        .credentials_provider(provider);
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}
