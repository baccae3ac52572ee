//! AWS Secrets Manager backend.
//!
//! This module provides a Secrets Manager implementation of the
//! [`SecretStoreProvider`](crate::SecretStoreProvider) trait, plus a
//! [`SecretsManagerConnector`] that builds one region-bound client per
//! invocation.
//!
//! # Example
//!
//! ```rust,ignore
//! use pinecfn_secrets::SecretStoreConnector;
//! use pinecfn_secrets::aws::{SecretsManagerConfig, SecretsManagerConnector};
//!
//! let connector = SecretsManagerConnector::new(SecretsManagerConfig::default());
//! let store = connector.connect("eu-west-1").await?;
//! store.create_secret("pinecone/endpoint", "idx.svc.pinecone.io").await?;
//! ```

mod client;
mod config;
mod error;

pub use client::{SecretsManagerClient, SecretsManagerConnector};
pub use config::{DEFAULT_TIMEOUT_SECS, SecretsManagerConfig};

/// Tracing target for Secrets Manager operations.
pub const TRACING_TARGET: &str = "pinecfn_secrets::aws";

/// Version stage that always points at the current secret value.
pub const CURRENT_VERSION_STAGE: &str = "AWSCURRENT";
