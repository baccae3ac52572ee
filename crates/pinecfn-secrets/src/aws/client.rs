//! Secrets Manager client and connector.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::Client;
use aws_smithy_types::timeout::TimeoutConfig;

use super::error::map_sdk_error;
use super::{CURRENT_VERSION_STAGE, SecretsManagerConfig, TRACING_TARGET};
use crate::{
    SecretError, SecretOperation, SecretResult, SecretStore, SecretStoreConnector,
    SecretStoreProvider,
};

/// Secrets Manager client bound to a single region.
#[derive(Clone)]
pub struct SecretsManagerClient {
    client: Client,
    region: String,
}

impl std::fmt::Debug for SecretsManagerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsManagerClient")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl SecretsManagerClient {
    /// Builds a client for `region` from the default AWS provider chain.
    pub async fn connect(config: &SecretsManagerConfig, region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .load()
            .await;

        // Inherit from SdkConfig (credentials, HTTP client, retry config) and
        // apply our overrides on top.
        let mut builder = aws_sdk_secretsmanager::config::Builder::from(&sdk_config);

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(config.effective_timeout())
            .build();
        builder = builder.timeout_config(timeout_config);

        tracing::debug!(
            target: TRACING_TARGET,
            region = %region,
            endpoint_url = ?config.endpoint_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Created Secrets Manager client"
        );

        Self {
            client: Client::from_conf(builder.build()),
            region: region.to_owned(),
        }
    }

    /// Wraps a pre-built SDK client.
    pub fn from_client(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Returns the region this client is bound to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Converts this client into a [`SecretStore`].
    pub fn into_service(self) -> SecretStore {
        SecretStore::new(self)
    }
}

#[async_trait::async_trait]
impl SecretStoreProvider for SecretsManagerClient {
    async fn fetch_secret(&self, name: &str) -> SecretResult<String> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .version_stage(CURRENT_VERSION_STAGE)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, SecretOperation::Fetch, name))?;

        output
            .secret_string()
            .map(str::to_owned)
            .ok_or_else(|| SecretError::malformed(name, "secret has no string value"))
    }

    async fn create_secret(&self, name: &str, value: &str) -> SecretResult<()> {
        let output = self
            .client
            .create_secret()
            .name(name)
            .secret_string(value)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, SecretOperation::Create, name))?;

        tracing::info!(
            target: TRACING_TARGET,
            secret = %name,
            arn = ?output.arn(),
            region = %self.region,
            "Created secret"
        );
        Ok(())
    }

    async fn delete_secret(&self, name: &str) -> SecretResult<()> {
        let output = self
            .client
            .delete_secret()
            .secret_id(name)
            .force_delete_without_recovery(true)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, SecretOperation::Delete, name))?;

        tracing::info!(
            target: TRACING_TARGET,
            secret = %name,
            arn = ?output.arn(),
            region = %self.region,
            "Deleted secret without recovery"
        );
        Ok(())
    }
}

/// Connector that builds a fresh [`SecretsManagerClient`] per region.
#[derive(Debug, Clone, Default)]
pub struct SecretsManagerConnector {
    config: SecretsManagerConfig,
}

impl SecretsManagerConnector {
    /// Creates a new connector with the given configuration.
    pub fn new(config: SecretsManagerConfig) -> Self {
        Self { config }
    }

    /// Gets the connector configuration.
    pub fn config(&self) -> &SecretsManagerConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl SecretStoreConnector for SecretsManagerConnector {
    async fn connect(&self, region: &str) -> SecretResult<SecretStore> {
        if region.is_empty() {
            return Err(SecretError::connection(region, "region is empty"));
        }

        let client = SecretsManagerClient::connect(&self.config, region).await;
        Ok(client.into_service())
    }
}
