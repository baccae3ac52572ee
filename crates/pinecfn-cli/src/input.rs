//! Event input.

use std::path::Path;

use anyhow::Context;
use pinecfn_provision::event::CustomResourceEvent;
use tokio::io::AsyncReadExt;

use crate::TRACING_TARGET_INPUT;
use crate::config::STDIN_PATH;

/// Reads and parses a custom resource event from `path`, or from stdin
/// when `path` is `-`.
pub async fn read_event(path: &Path) -> anyhow::Result<CustomResourceEvent> {
    let document = if path == Path::new(STDIN_PATH) {
        let mut document = String::new();
        tokio::io::stdin()
            .read_to_string(&mut document)
            .await
            .context("failed to read event from stdin")?;
        document
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read event file '{}'", path.display()))?
    };

    tracing::debug!(
        target: TRACING_TARGET_INPUT,
        source = %path.display(),
        bytes = document.len(),
        "Read event document"
    );

    parse_event(&document)
}

/// Parses a custom resource event document.
pub fn parse_event(document: &str) -> anyhow::Result<CustomResourceEvent> {
    serde_json::from_str(document).context("invalid custom resource event")
}
