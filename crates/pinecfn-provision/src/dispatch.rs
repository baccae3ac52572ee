//! Request-type dispatch.

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::error::{Error, Result};
use crate::provisioner::{ProvisionOutcome, Provisioner, Stage, enter};
use crate::request::{ProvisioningRequest, ResourceProperties};
use crate::TRACING_TARGET;

/// Request types handled by the provisioner.
///
/// There is no `Update`: in-place updates are rejected like any other
/// unknown token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
pub enum RequestType {
    /// Provision a new index.
    Create,
    /// Deprovision an existing index.
    Delete,
}

impl RequestType {
    /// Parses a request type token, case-sensitively.
    pub fn parse(token: &str) -> Result<Self> {
        Self::from_str(token).map_err(|_| Error::UnknownRequestType(token.to_owned()))
    }
}

/// Runs the workflow selected by `request_type`.
///
/// The token is checked before the properties are read, so an unknown
/// request type never reaches the secret store or the control plane.
pub async fn dispatch(
    provisioner: &Provisioner,
    request_type: &str,
    properties: &ResourceProperties,
) -> Result<ProvisionOutcome> {
    let request_type = match RequestType::parse(request_type) {
        Ok(request_type) => request_type,
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                request_type = %request_type,
                "Rejecting unsupported request type"
            );
            return Err(error);
        }
    };

    enter(Stage::ValidatingParams);
    let request = ProvisioningRequest::from_properties(properties)?;

    tracing::info!(
        target: TRACING_TARGET,
        request_type = %request_type,
        index = %request.index_name,
        region = %request.region,
        dimension = request.dimension,
        "Dispatching provisioning request"
    );

    match request_type {
        RequestType::Create => provisioner.create(&request).await,
        RequestType::Delete => provisioner.delete(&request).await,
    }
}
