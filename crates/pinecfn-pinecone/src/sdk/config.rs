//! Pinecone client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Pinecone client configuration.
///
/// The API key is not part of the configuration: it is resolved from the
/// secret store on every invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct PineconeConfig {
    /// Control-plane host override
    #[cfg_attr(
        feature = "config",
        arg(long = "pinecone-control-plane-host", env = "PINECONE_CONTROLLER_HOST")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_host: Option<String>,

    /// Source tag sent with every request
    #[cfg_attr(
        feature = "config",
        arg(long = "pinecone-source-tag", env = "PINECONE_SOURCE_TAG")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<String>,

    /// Seconds to wait for a new index to become ready (0 returns immediately)
    #[cfg_attr(
        feature = "config",
        arg(long = "pinecone-wait-secs", env = "PINECONE_WAIT_SECS", default_value = "0")
    )]
    #[serde(default)]
    pub wait_secs: u64,
}

impl PineconeConfig {
    /// Returns how long index creation waits for readiness, if at all.
    pub fn wait_for_ready(&self) -> Option<Duration> {
        (self.wait_secs > 0).then(|| Duration::from_secs(self.wait_secs))
    }

    /// Sets the control-plane host override.
    pub fn with_control_plane_host(mut self, host: impl Into<String>) -> Self {
        self.control_plane_host = Some(host.into());
        self
    }

    /// Sets the source tag.
    pub fn with_source_tag(mut self, source_tag: impl Into<String>) -> Self {
        self.source_tag = Some(source_tag.into());
        self
    }

    /// Sets the readiness wait in seconds.
    pub fn with_wait_secs(mut self, wait_secs: u64) -> Self {
        self.wait_secs = wait_secs;
        self
    }
}
