//! Secrets Manager client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default operation timeout for Secrets Manager calls: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Secrets Manager client.
///
/// Credentials and the region come from the standard AWS provider chain and
/// from the invocation respectively; this only carries overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SecretsManagerConfig {
    /// Endpoint override (e.g. LocalStack)
    #[cfg_attr(
        feature = "config",
        arg(long = "secrets-endpoint-url", env = "SECRETS_ENDPOINT_URL")
    )]
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Operation timeout in seconds, including SDK retries
    #[cfg_attr(
        feature = "config",
        arg(long = "secrets-timeout", env = "SECRETS_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SecretsManagerConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            timeout: default_timeout_secs(),
        }
    }
}

impl SecretsManagerConfig {
    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout)
        }
    }

    /// Set the endpoint override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = timeout_secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SecretsManagerConfig::default();
        assert!(config.endpoint_url.is_none());
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = SecretsManagerConfig::default().with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_builder_pattern() {
        let config = SecretsManagerConfig::default()
            .with_endpoint_url("http://localhost:4566")
            .with_timeout(5);

        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.effective_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: SecretsManagerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
    }
}
