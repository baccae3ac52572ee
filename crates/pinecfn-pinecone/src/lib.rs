#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod index;
mod service;

#[cfg(feature = "sdk")]
#[cfg_attr(docsrs, doc(cfg(feature = "sdk")))]
pub mod sdk;

pub use error::{ControlPlaneError, ControlPlaneResult};
pub use index::{Cloud, IndexDescription, MAX_DIMENSION, Metric, ServerlessIndexSpec};
use pinecfn_secrets::ApiKey;
pub use service::ControlPlane;

/// Tracing target for control-plane operations.
pub const TRACING_TARGET: &str = "pinecfn_pinecone";

/// Trait for vector-index control-plane backends.
#[async_trait::async_trait]
pub trait ControlPlaneProvider: Send + Sync {
    /// Creates a serverless index and returns its description.
    async fn create_serverless_index(
        &self,
        spec: &ServerlessIndexSpec,
    ) -> ControlPlaneResult<IndexDescription>;

    /// Deletes an index by name.
    async fn delete_index(&self, name: &str) -> ControlPlaneResult<()>;
}

/// Builds a [`ControlPlane`] authenticated with an API key.
#[async_trait::async_trait]
pub trait ControlPlaneConnector: Send + Sync {
    /// Connects to the control plane with `api_key`.
    async fn connect(&self, api_key: &ApiKey) -> ControlPlaneResult<ControlPlane>;
}
