//! Pinecone control-plane backend built on `pinecone-sdk`.

mod client;
mod config;
mod error;

pub use client::{PineconeConnector, PineconeControlPlane};
pub use config::PineconeConfig;

/// Tracing target for SDK-backed control-plane operations.
pub const TRACING_TARGET: &str = "pinecfn_pinecone::sdk";
