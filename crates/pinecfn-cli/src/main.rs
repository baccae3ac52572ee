#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod input;
mod telemetry;

use std::process;

use anyhow::Context;
use pinecfn_pinecone::sdk::PineconeConnector;
use pinecfn_provision::Provisioner;
use pinecfn_provision::event::{CustomResourceResponse, handle_event};
use pinecfn_secrets::aws::SecretsManagerConnector;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "pinecfn_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "pinecfn_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "pinecfn_cli::config";
pub const TRACING_TARGET_INPUT: &str = "pinecfn_cli::input";

#[tokio::main]
async fn main() {
    let error = match run().await {
        Ok(response) if response.is_success() => {
            tracing::info!(target: TRACING_TARGET_SHUTDOWN, "Request succeeded");
            process::exit(0);
        }
        Ok(response) => {
            tracing::info!(
                target: TRACING_TARGET_SHUTDOWN,
                status = %response.status,
                "Request failed"
            );
            process::exit(1);
        }
        Err(error) => error,
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "Runner terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Runs one custom resource request and prints the response document.
async fn run() -> anyhow::Result<CustomResourceResponse> {
    let cli = Cli::init();

    telemetry::init_tracing(cli.log_json)?;
    cli.log();
    cli.validate().context("invalid configuration")?;

    let event = input::read_event(&cli.event).await?;
    let provisioner = Provisioner::new(
        SecretsManagerConnector::new(cli.secrets.clone()),
        PineconeConnector::new(cli.pinecone.clone()),
    );

    let response = handle_event(&provisioner, &event).await;
    let document =
        serde_json::to_string(&response).context("failed to serialize response document")?;
    println!("{document}");

    Ok(response)
}
