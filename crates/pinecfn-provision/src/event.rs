//! Custom resource request envelope and response document.
//!
//! [`CustomResourceEvent`] mirrors the request CloudFormation sends to a
//! custom resource provider, and [`CustomResourceResponse`] the document it
//! expects back. Delivering the response to `ResponseURL` is left to the
//! caller.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::dispatch::dispatch;
use crate::error::{Error, Result};
use crate::provisioner::{ProvisionOutcome, Provisioner};
use crate::request::ResourceProperties;
use crate::TRACING_TARGET;

/// Custom resource request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    /// `Create`, `Update` or `Delete`.
    pub request_type: String,
    /// Unique id of this request.
    #[serde(default)]
    pub request_id: String,
    /// Pre-signed URL that receives the response.
    #[serde(rename = "ResponseURL", default)]
    pub response_url: String,
    /// Custom resource type, e.g. `Custom::PineconeIndex`.
    #[serde(default)]
    pub resource_type: String,
    /// Template logical id of the resource.
    #[serde(default)]
    pub logical_resource_id: String,
    /// ARN of the stack.
    #[serde(default)]
    pub stack_id: String,
    /// Physical id from a previous response; absent on `Create`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    /// Resource properties from the template.
    #[serde(default)]
    pub resource_properties: ResourceProperties,
}

/// Outcome reported to CloudFormation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Custom resource response document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,
    /// Failure reason; only set on `FAILED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub no_echo: bool,
    /// Attributes exposed to `Fn::GetAtt`; never set by this provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl CustomResourceResponse {
    /// Builds a `SUCCESS` response.
    pub fn success(event: &CustomResourceEvent, outcome: &ProvisionOutcome) -> Self {
        Self {
            status: ResponseStatus::Success,
            reason: None,
            physical_resource_id: outcome.physical_resource_id.clone(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data: None,
        }
    }

    /// Builds a `FAILED` response carrying the full error chain.
    ///
    /// The physical id falls back to the event's own id, then to the
    /// logical id, since CloudFormation rejects an empty one.
    pub fn failure(event: &CustomResourceEvent, error: &Error) -> Self {
        let physical_resource_id = event
            .physical_resource_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| event.logical_resource_id.clone());

        Self {
            status: ResponseStatus::Failed,
            reason: Some(error.report()),
            physical_resource_id,
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data: None,
        }
    }

    /// Builds the response for a workflow result.
    pub fn from_result(event: &CustomResourceEvent, result: &Result<ProvisionOutcome>) -> Self {
        match result {
            Ok(outcome) => Self::success(event, outcome),
            Err(error) => Self::failure(event, error),
        }
    }

    /// Returns `true` for a `SUCCESS` response.
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

/// Dispatches `event` and turns the result into a response document.
pub async fn handle_event(
    provisioner: &Provisioner,
    event: &CustomResourceEvent,
) -> CustomResourceResponse {
    tracing::info!(
        target: TRACING_TARGET,
        request_type = %event.request_type,
        request_id = %event.request_id,
        logical_resource_id = %event.logical_resource_id,
        stack_id = %event.stack_id,
        "Handling custom resource event"
    );

    let result = dispatch(provisioner, &event.request_type, &event.resource_properties).await;
    if let Err(error) = &result {
        tracing::error!(
            target: TRACING_TARGET,
            kind = error.kind_str(),
            error = %error.report(),
            request_id = %event.request_id,
            "Custom resource request failed"
        );
    }

    CustomResourceResponse::from_result(event, &result)
}
