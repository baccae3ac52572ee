//! In-memory vector-index control plane.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use pinecfn_pinecone::{
    ControlPlane, ControlPlaneConnector, ControlPlaneError, ControlPlaneProvider,
    ControlPlaneResult, IndexDescription, ServerlessIndexSpec,
};
use pinecfn_secrets::ApiKey;

use super::{Call, CallLog, Failures, MockOperation, lock};

/// Control plane backed by a shared name-to-host map.
///
/// Without [`with_api_key`](Self::with_api_key) any key is accepted.
#[derive(Debug, Clone)]
pub struct InMemoryControlPlane {
    log: CallLog,
    api_key: Option<String>,
    indexes: Arc<Mutex<BTreeMap<String, String>>>,
    failures: Failures,
}

impl InMemoryControlPlane {
    /// Creates a control plane with no indexes, recording into `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            api_key: None,
            indexes: Arc::default(),
            failures: Failures::default(),
        }
    }

    /// Rejects connections with any other API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the host of an existing index.
    pub fn host_of(&self, name: &str) -> Option<String> {
        lock(&self.indexes).get(name).cloned()
    }

    /// Returns the names of all existing indexes, sorted.
    pub fn index_names(&self) -> Vec<String> {
        lock(&self.indexes).keys().cloned().collect()
    }

    /// Makes every later call of `operation` fail with an API error.
    pub fn fail_on(&self, operation: MockOperation) {
        self.failures.insert(operation);
    }
}

#[async_trait::async_trait]
impl ControlPlaneProvider for InMemoryControlPlane {
    async fn create_serverless_index(
        &self,
        spec: &ServerlessIndexSpec,
    ) -> ControlPlaneResult<IndexDescription> {
        self.log.record(Call::CreateIndex {
            name: spec.name.clone(),
            dimension: spec.dimension,
            region: spec.region.clone(),
        });
        if self.failures.contains(MockOperation::CreateIndex) {
            return Err(ControlPlaneError::api("create_index", "injected failure"));
        }

        let mut indexes = lock(&self.indexes);
        if indexes.contains_key(&spec.name) {
            return Err(ControlPlaneError::index_already_exists(&spec.name));
        }

        let host = format!(
            "{}-{:07x}.svc.{}-{}.pinecone.io",
            spec.name,
            indexes.len() + 1,
            spec.cloud(),
            spec.region
        );
        indexes.insert(spec.name.clone(), host.clone());

        Ok(IndexDescription {
            name: spec.name.clone(),
            host,
        })
    }

    async fn delete_index(&self, name: &str) -> ControlPlaneResult<()> {
        self.log.record(Call::DeleteIndex { name: name.into() });
        if self.failures.contains(MockOperation::DeleteIndex) {
            return Err(ControlPlaneError::api("delete_index", "injected failure"));
        }

        lock(&self.indexes)
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ControlPlaneError::index_not_found(name))
    }
}

#[async_trait::async_trait]
impl ControlPlaneConnector for InMemoryControlPlane {
    async fn connect(&self, api_key: &ApiKey) -> ControlPlaneResult<ControlPlane> {
        self.log.record(Call::ConnectControlPlane);
        match &self.api_key {
            Some(expected) if expected != api_key.expose() => {
                Err(ControlPlaneError::unauthorized("invalid API key"))
            }
            _ => Ok(ControlPlane::new(self.clone())),
        }
    }
}
