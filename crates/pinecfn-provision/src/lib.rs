#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod dispatch;
mod error;
mod provisioner;
mod request;

pub mod event;

pub use dispatch::{RequestType, dispatch};
pub use error::{Error, ErrorKind, Result};
pub use provisioner::{ProvisionOutcome, Provisioner, RESOURCE_KIND, Stage, resolve_api_key};
pub use request::{ParameterError, ProvisioningRequest, ResourceProperties, property};

/// Tracing target for provisioning workflows.
pub const TRACING_TARGET: &str = "pinecfn_provision";
