//! Control-plane API key resolved from a secret.

use std::fmt;

use serde::Deserialize;

use crate::error::{SecretError, SecretResult};

/// JSON field of the API key secret document that holds the key.
pub const API_KEY_FIELD: &str = "apiKey";

/// Shape of the API key secret: `{"apiKey": "..."}`.
///
/// Other fields are ignored.
#[derive(Debug, Deserialize)]
struct ApiKeyDocument {
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
}

/// A non-empty control-plane API key.
///
/// The value is redacted from `Debug` output and is only reachable through
/// [`ApiKey::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates an API key, rejecting empty values.
    ///
    /// `secret_name` is only used to build the error.
    pub fn new(secret_name: &str, value: impl Into<String>) -> SecretResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(SecretError::malformed(
                secret_name,
                format!("field '{API_KEY_FIELD}' is empty"),
            ));
        }
        Ok(Self(value))
    }

    /// Parses the JSON document stored in the API key secret.
    pub fn from_secret_document(secret_name: &str, document: &str) -> SecretResult<Self> {
        let parsed: ApiKeyDocument = serde_json::from_str(document).map_err(|e| {
            SecretError::malformed(secret_name, format!("expected a JSON object: {e}"))
        })?;

        let value = parsed.api_key.ok_or_else(|| {
            SecretError::malformed(secret_name, format!("missing field '{API_KEY_FIELD}'"))
        })?;

        Self::new(secret_name, value)
    }

    /// Returns the raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_api_key_document() {
        let key = ApiKey::from_secret_document("pinecone", r#"{"apiKey": "pk-123"}"#).unwrap();
        assert_eq!(key.expose(), "pk-123");
    }

    #[test]
    fn test_ignores_unrelated_fields() {
        let doc = r#"{"apiKey": "pk-123", "environment": "us-west-2"}"#;
        let key = ApiKey::from_secret_document("pinecone", doc).unwrap();
        assert_eq!(key.expose(), "pk-123");
    }

    #[test]
    fn test_rejects_missing_field() {
        let err = ApiKey::from_secret_document("pinecone", r#"{"key": "pk-123"}"#).unwrap_err();
        assert!(matches!(err, SecretError::Malformed { ref name, .. } if name == "pinecone"));
        assert!(err.to_string().contains("missing field 'apiKey'"));
    }

    #[test]
    fn test_rejects_empty_key() {
        let err = ApiKey::from_secret_document("pinecone", r#"{"apiKey": ""}"#).unwrap_err();
        assert!(matches!(err, SecretError::Malformed { .. }));
    }

    #[test]
    fn test_rejects_plain_string() {
        let err = ApiKey::from_secret_document("pinecone", "pk-123").unwrap_err();
        assert!(matches!(err, SecretError::Malformed { .. }));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("pinecone", "pk-123").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }
}
