#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod api_key;
mod error;
mod service;

#[cfg(feature = "aws")]
#[cfg_attr(docsrs, doc(cfg(feature = "aws")))]
pub mod aws;

pub use api_key::{API_KEY_FIELD, ApiKey};
pub use error::{SecretError, SecretOperation, SecretResult};
pub use service::SecretStore;

/// Tracing target for secret store operations.
pub const TRACING_TARGET: &str = "pinecfn_secrets";

/// Core trait for secret store operations.
///
/// Implementations are bound to a single region. None of the operations
/// retry; any failure is surfaced to the caller.
#[async_trait::async_trait]
pub trait SecretStoreProvider: Send + Sync {
    /// Returns the current string value of the named secret.
    async fn fetch_secret(&self, name: &str) -> SecretResult<String>;

    /// Creates a new secret holding `value`.
    async fn create_secret(&self, name: &str, value: &str) -> SecretResult<()>;

    /// Deletes the named secret immediately, without a recovery window.
    async fn delete_secret(&self, name: &str) -> SecretResult<()>;
}

/// Builds a [`SecretStore`] bound to a region.
///
/// A connector is called once per invocation, so no client is shared
/// between invocations.
#[async_trait::async_trait]
pub trait SecretStoreConnector: Send + Sync {
    /// Connects to the secret store in `region`.
    async fn connect(&self, region: &str) -> SecretResult<SecretStore>;
}
