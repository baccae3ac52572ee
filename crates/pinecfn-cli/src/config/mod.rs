//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── event, log_json            # Input and log format
//! ├── secrets: SecretsManagerConfig  # Endpoint override, timeout
//! └── pinecone: PineconeConfig       # Controller host, source tag, readiness wait
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::bail;
use clap::Parser;
use pinecfn_pinecone::sdk::PineconeConfig;
use pinecfn_secrets::aws::SecretsManagerConfig;
use serde::{Deserialize, Serialize};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Path that selects stdin as the event source.
pub const STDIN_PATH: &str = "-";

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "pinecfn")]
#[command(about = "Provisions and deletes a Pinecone index for a CloudFormation custom resource")]
#[command(version)]
pub struct Cli {
    /// Path of the custom resource event JSON, or `-` for stdin
    #[arg(long, env = "PINECFN_EVENT")]
    pub event: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long, env = "PINECFN_LOG_JSON")]
    #[serde(default)]
    pub log_json: bool,

    /// Secrets Manager client configuration.
    #[clap(flatten)]
    pub secrets: SecretsManagerConfig,

    /// Pinecone client configuration.
    #[clap(flatten)]
    pub pinecone: PineconeConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap can use its values as
    /// defaults for `env`-backed arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Returns `true` if the event is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.event == Path::new(STDIN_PATH)
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.event.as_os_str().is_empty() {
            bail!("event path must not be empty");
        }
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            event = %self.event.display(),
            stdin = self.reads_stdin(),
            secrets_endpoint_url = ?self.secrets.endpoint_url,
            secrets_timeout_secs = self.secrets.effective_timeout().as_secs(),
            pinecone_control_plane_host = ?self.pinecone.control_plane_host,
            pinecone_wait_secs = self.pinecone.wait_secs,
            "Runner configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
