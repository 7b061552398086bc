//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::Client;

/// AWS client configuration.
///
/// Both fields are optional; when unset the SDK's default provider chain
/// decides (profile, environment, instance metadata).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region override.
    pub region: Option<String>,
}

impl AwsConfig {
    /// Reads `AWS_ENDPOINT_URL` and `AWS_REGION` through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|v| !v.is_empty()),
            region: lookup("AWS_REGION").filter(|v| !v.is_empty()),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match (&self.endpoint_url, &self.region) {
            (Some(url), _) => format!("Local DynamoDB ({})", url),
            (None, Some(region)) => format!("AWS DynamoDB (region: {})", region),
            (None, None) => "AWS DynamoDB (default region)".to_string(),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &config.region {
        sdk_config_loader = sdk_config_loader.region(aws_config::Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
