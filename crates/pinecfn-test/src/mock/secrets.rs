//! In-memory secret store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pinecfn_secrets::{
    SecretError, SecretOperation, SecretResult, SecretStore, SecretStoreConnector,
    SecretStoreProvider,
};

use super::{Call, CallLog, Failures, MockOperation, lock};

/// Secret store backed by a shared map.
///
/// Clones share the same secrets, failures and call log, so a test can keep
/// a handle for assertions after passing one to the provisioner.
#[derive(Debug, Clone)]
pub struct InMemorySecretStore {
    log: CallLog,
    secrets: Arc<Mutex<HashMap<String, String>>>,
    failures: Failures,
}

impl InMemorySecretStore {
    /// Creates an empty store recording into `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            secrets: Arc::default(),
            failures: Failures::default(),
        }
    }

    /// Seeds a secret without recording a call.
    pub fn with_secret(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        lock(&self.secrets).insert(name.into(), value.into());
        self
    }

    /// Returns the current value of a secret.
    pub fn get(&self, name: &str) -> Option<String> {
        lock(&self.secrets).get(name).cloned()
    }

    /// Makes every later call of `operation` fail with a backend error.
    pub fn fail_on(&self, operation: MockOperation) {
        self.failures.insert(operation);
    }

    fn check(
        &self,
        operation: MockOperation,
        kind: SecretOperation,
        name: &str,
    ) -> SecretResult<()> {
        if self.failures.contains(operation) {
            return Err(SecretError::backend(kind, name, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SecretStoreProvider for InMemorySecretStore {
    async fn fetch_secret(&self, name: &str) -> SecretResult<String> {
        self.log.record(Call::FetchSecret { name: name.into() });
        self.check(MockOperation::FetchSecret, SecretOperation::Fetch, name)?;
        self.get(name).ok_or_else(|| SecretError::not_found(name))
    }

    async fn create_secret(&self, name: &str, value: &str) -> SecretResult<()> {
        self.log.record(Call::CreateSecret { name: name.into() });
        self.check(MockOperation::CreateSecret, SecretOperation::Create, name)?;

        let mut secrets = lock(&self.secrets);
        if secrets.contains_key(name) {
            return Err(SecretError::already_exists(name));
        }
        secrets.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete_secret(&self, name: &str) -> SecretResult<()> {
        self.log.record(Call::DeleteSecret { name: name.into() });
        self.check(MockOperation::DeleteSecret, SecretOperation::Delete, name)?;

        lock(&self.secrets)
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| SecretError::not_found(name))
    }
}

#[async_trait::async_trait]
impl SecretStoreConnector for InMemorySecretStore {
    async fn connect(&self, region: &str) -> SecretResult<SecretStore> {
        self.log.record(Call::ConnectSecrets {
            region: region.into(),
        });
        if region.is_empty() {
            return Err(SecretError::connection(region, "region must not be empty"));
        }
        Ok(SecretStore::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_fetch_delete() {
        let log = CallLog::default();
        let store = InMemorySecretStore::new(log.clone());
        let service = store.connect("us-west-2").await.unwrap();

        service.create_secret("endpoint", "host").await.unwrap();
        assert_eq!(service.fetch_secret("endpoint").await.unwrap(), "host");
        assert!(
            service
                .create_secret("endpoint", "other")
                .await
                .unwrap_err()
                .is_already_exists()
        );

        service.delete_secret("endpoint").await.unwrap();
        assert!(store.get("endpoint").is_none());
        assert!(service.delete_secret("endpoint").await.unwrap_err().is_not_found());
        assert_eq!(log.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = InMemorySecretStore::new(CallLog::default()).with_secret("a", "b");
        store.fail_on(MockOperation::FetchSecret);

        let err = store.fetch_secret("a").await.unwrap_err();
        assert!(matches!(
            err,
            SecretError::Backend {
                operation: SecretOperation::Fetch,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_region_is_rejected() {
        let store = InMemorySecretStore::new(CallLog::default());
        assert!(matches!(
            store.connect("").await.unwrap_err(),
            SecretError::Connection { .. }
        ));
    }
}
