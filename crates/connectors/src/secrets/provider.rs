use crate::{aws::config::SharedAwsConfig, secrets::error::SecretsError};
use async_trait::async_trait;
use aws_sdk_secretsmanager::{Client, error::DisplayErrorContext};
use model::execution::connection::SecretBundle;
use tracing::info;

/// Source of credential bundles, looked up by identifier.
#[async_trait]
pub trait SecretsProvider: Send + Sync {
    async fn fetch(&self, secret_id: &str) -> Result<SecretBundle, SecretsError>;
}

/// Reads bundles from AWS Secrets Manager. The client is only built once a
/// bundle is actually fetched.
pub struct AwsSecretsProvider<'a> {
    aws: &'a SharedAwsConfig,
}

impl<'a> AwsSecretsProvider<'a> {
    pub fn new(aws: &'a SharedAwsConfig) -> Self {
        Self { aws }
    }
}

#[async_trait]
impl SecretsProvider for AwsSecretsProvider<'_> {
    async fn fetch(&self, secret_id: &str) -> Result<SecretBundle, SecretsError> {
        info!("Fetching Secret: {}", secret_id);

        let client = Client::new(self.aws.get().await);
        let output = client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| SecretsError::Fetch {
                secret_id: secret_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let secret_string = output
            .secret_string()
            .ok_or_else(|| SecretsError::NotAString(secret_id.to_string()))?;

        info!("Retrieved secret");
        parse_bundle(secret_id, secret_string)
    }
}

pub fn parse_bundle(secret_id: &str, raw: &str) -> Result<SecretBundle, SecretsError> {
    serde_json::from_str(raw).map_err(|source| SecretsError::Malformed {
        secret_id: secret_id.to_string(),
        source,
    })
}
