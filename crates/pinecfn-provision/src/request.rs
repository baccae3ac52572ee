//! Resource property extraction.

use std::num::ParseIntError;

use serde_json::Value;
use thiserror::Error;

/// Untyped resource properties as delivered in the custom resource event.
pub type ResourceProperties = serde_json::Map<String, Value>;

/// Names of the resource properties read by [`ProvisioningRequest`].
pub mod property {
    /// Region of both the secret store and the index.
    pub const REGION: &str = "region";
    /// Name of the index.
    pub const INDEX_NAME: &str = "indexName";
    /// Vector dimensionality, as a string.
    pub const DIMENSION: &str = "dimension";
    /// Name of the secret holding `{"apiKey": "..."}`.
    pub const API_KEY_SECRET_NAME: &str = "apiKeySecretName";
    /// Name of the secret that receives the index host.
    pub const INDEX_ENDPOINT_SECRET_NAME: &str = "indexEndpointSecretName";
}

/// Invalid or missing resource property.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// The property is absent.
    #[error("missing property '{name}'")]
    MissingProperty { name: &'static str },

    /// The property is present but not a string.
    #[error("property '{name}' must be a string, found {found}")]
    TypeMismatch {
        name: &'static str,
        found: &'static str,
    },

    /// The property is not a valid 32-bit integer.
    #[error("property '{name}' is not a valid 32-bit integer: '{value}'")]
    InvalidInteger {
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The property must not be empty.
    #[error("property '{name}' must not be empty")]
    EmptyProperty { name: &'static str },
}

impl ParameterError {
    /// Returns the name of the offending property.
    pub fn property(&self) -> &'static str {
        match self {
            Self::MissingProperty { name }
            | Self::TypeMismatch { name, .. }
            | Self::InvalidInteger { name, .. }
            | Self::EmptyProperty { name } => name,
        }
    }
}

/// Validated parameters of one provisioning invocation.
///
/// Pure data: the API key is resolved separately by the provisioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningRequest {
    /// Region of both the secret store and the index.
    pub region: String,
    /// Name of the index.
    pub index_name: String,
    /// Vector dimensionality.
    pub dimension: i32,
    /// Name of the secret holding the API key document.
    pub api_key_secret_name: String,
    /// Name of the secret that holds the index host.
    pub index_endpoint_secret_name: String,
}

impl ProvisioningRequest {
    /// Extracts and validates the request from resource properties.
    ///
    /// Stops at the first invalid property. Unknown properties such as
    /// `ServiceToken` are ignored.
    pub fn from_properties(properties: &ResourceProperties) -> Result<Self, ParameterError> {
        let region = string_property(properties, property::REGION)?;

        let index_name = string_property(properties, property::INDEX_NAME)?;
        if index_name.is_empty() {
            return Err(ParameterError::EmptyProperty {
                name: property::INDEX_NAME,
            });
        }

        let dimension = integer_property(properties, property::DIMENSION)?;
        let api_key_secret_name = string_property(properties, property::API_KEY_SECRET_NAME)?;
        let index_endpoint_secret_name =
            string_property(properties, property::INDEX_ENDPOINT_SECRET_NAME)?;

        Ok(Self {
            region: region.to_owned(),
            index_name: index_name.to_owned(),
            dimension,
            api_key_secret_name: api_key_secret_name.to_owned(),
            index_endpoint_secret_name: index_endpoint_secret_name.to_owned(),
        })
    }
}

fn string_property<'a>(
    properties: &'a ResourceProperties,
    name: &'static str,
) -> Result<&'a str, ParameterError> {
    match properties.get(name) {
        None => Err(ParameterError::MissingProperty { name }),
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(ParameterError::TypeMismatch {
            name,
            found: json_type(other),
        }),
    }
}

fn integer_property(
    properties: &ResourceProperties,
    name: &'static str,
) -> Result<i32, ParameterError> {
    let value = string_property(properties, name)?;
    value
        .parse::<i32>()
        .map_err(|source| ParameterError::InvalidInteger {
            name,
            value: value.to_owned(),
            source,
        })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
