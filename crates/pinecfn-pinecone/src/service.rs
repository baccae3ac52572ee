//! Control-plane service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    ControlPlaneProvider, ControlPlaneResult, IndexDescription, ServerlessIndexSpec,
    TRACING_TARGET,
};

/// Unified control-plane client that wraps backend implementations.
///
/// Validates index specs before they reach the backend and logs every call.
#[derive(Clone)]
pub struct ControlPlane {
    inner: Arc<dyn ControlPlaneProvider>,
}

impl fmt::Debug for ControlPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlPlane").finish_non_exhaustive()
    }
}

impl ControlPlane {
    /// Creates a new control-plane wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: ControlPlaneProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates a serverless index.
    pub async fn create_serverless_index(
        &self,
        spec: &ServerlessIndexSpec,
    ) -> ControlPlaneResult<IndexDescription> {
        spec.validate()?;

        let started_at = Instant::now();
        tracing::debug!(
            target: TRACING_TARGET,
            index = %spec.name,
            dimension = spec.dimension,
            metric = %spec.metric(),
            cloud = %spec.cloud(),
            region = %spec.region,
            "Creating serverless index"
        );

        let result = self.inner.create_serverless_index(spec).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(description) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    index = %description.name,
                    host = %description.host,
                    elapsed_ms = elapsed.as_millis(),
                    "Serverless index created"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    index = %spec.name,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Failed to create serverless index"
                );
            }
        }

        result
    }

    /// Deletes an index by name.
    pub async fn delete_index(&self, name: &str) -> ControlPlaneResult<()> {
        let started_at = Instant::now();
        tracing::debug!(target: TRACING_TARGET, index = %name, "Deleting index");

        let result = self.inner.delete_index(name).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(()) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    index = %name,
                    elapsed_ms = elapsed.as_millis(),
                    "Index deleted"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    index = %name,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Failed to delete index"
                );
            }
        }

        result
    }
}
