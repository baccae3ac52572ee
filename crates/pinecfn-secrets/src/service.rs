//! Secret store service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{ApiKey, SecretOperation, SecretResult, SecretStoreProvider, TRACING_TARGET};

/// Secret store service wrapper with observability.
///
/// This wrapper adds structured logging to any secret store implementation.
/// Secret values are never logged. The inner provider is wrapped in `Arc`
/// for cheap cloning.
#[derive(Clone)]
pub struct SecretStore {
    inner: Arc<dyn SecretStoreProvider>,
}

impl fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretStore").finish_non_exhaustive()
    }
}

impl SecretStore {
    /// Create a new secret store wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: SecretStoreProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Returns the current value of the named secret.
    pub async fn fetch_secret(&self, name: &str) -> SecretResult<String> {
        let started_at = Instant::now();
        tracing::debug!(target: TRACING_TARGET, secret = %name, "Fetching secret");

        let result = self.inner.fetch_secret(name).await;
        log_outcome(SecretOperation::Fetch, name, started_at, &result);
        result
    }

    /// Fetches the API key secret and extracts its `apiKey` field.
    pub async fn fetch_api_key(&self, name: &str) -> SecretResult<ApiKey> {
        let document = self.fetch_secret(name).await?;
        ApiKey::from_secret_document(name, &document)
    }

    /// Creates a new secret holding `value`.
    pub async fn create_secret(&self, name: &str, value: &str) -> SecretResult<()> {
        let started_at = Instant::now();
        tracing::debug!(
            target: TRACING_TARGET,
            secret = %name,
            value_len = value.len(),
            "Creating secret"
        );

        let result = self.inner.create_secret(name, value).await;
        log_outcome(SecretOperation::Create, name, started_at, &result);
        result
    }

    /// Deletes the named secret without a recovery window.
    pub async fn delete_secret(&self, name: &str) -> SecretResult<()> {
        let started_at = Instant::now();
        tracing::debug!(target: TRACING_TARGET, secret = %name, "Force-deleting secret");

        let result = self.inner.delete_secret(name).await;
        log_outcome(SecretOperation::Delete, name, started_at, &result);
        result
    }
}

fn log_outcome<T>(
    operation: SecretOperation,
    name: &str,
    started_at: Instant,
    result: &SecretResult<T>,
) {
    let elapsed = started_at.elapsed();
    match result {
        Ok(_) => {
            tracing::debug!(
                target: TRACING_TARGET,
                operation = %operation,
                secret = %name,
                elapsed_ms = elapsed.as_millis(),
                "Secret operation completed"
            );
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET,
                operation = %operation,
                secret = %name,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Secret operation failed"
            );
        }
    }
}
