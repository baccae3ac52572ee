//! Error types for secret store operations.

use strum::{AsRefStr, Display, IntoStaticStr};
use thiserror::Error;

/// Result type alias for secret store operations.
pub type SecretResult<T, E = SecretError> = std::result::Result<T, E>;

/// Secret store operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SecretOperation {
    /// Reading the current secret value.
    Fetch,
    /// Creating a new secret.
    Create,
    /// Force-deleting a secret.
    Delete,
}

/// Secret store errors.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The secret does not exist.
    #[error("secret '{name}' not found")]
    NotFound { name: String },

    /// A secret with the same name already exists.
    #[error("secret '{name}' already exists")]
    AlreadyExists { name: String },

    /// The caller is not allowed to access the secret.
    #[error("access denied to secret '{name}': {message}")]
    AccessDenied { name: String, message: String },

    /// The secret value does not have the expected shape.
    #[error("secret '{name}' is malformed: {reason}")]
    Malformed { name: String, reason: String },

    /// The store client could not be built for the region.
    #[error("cannot connect to secret store in region '{region}': {message}")]
    Connection { region: String, message: String },

    /// Any other backend failure.
    #[error("secret store {operation} failed for '{name}': {message}")]
    Backend {
        operation: SecretOperation,
        name: String,
        message: String,
    },
}

impl SecretError {
    /// Creates a not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates an already exists error.
    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists { name: name.into() }
    }

    /// Creates an access denied error.
    pub fn access_denied(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AccessDenied {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed secret error.
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a connection error.
    pub fn connection(region: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            region: region.into(),
            message: message.into(),
        }
    }

    /// Creates a backend error.
    pub fn backend(
        operation: SecretOperation,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Backend {
            operation,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if the secret does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the secret already exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns the name of the secret the error refers to, if any.
    pub fn secret_name(&self) -> Option<&str> {
        match self {
            Self::NotFound { name }
            | Self::AlreadyExists { name }
            | Self::AccessDenied { name, .. }
            | Self::Malformed { name, .. }
            | Self::Backend { name, .. } => Some(name),
            Self::Connection { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_secret() {
        assert_eq!(
            SecretError::not_found("prod/endpoint").to_string(),
            "secret 'prod/endpoint' not found"
        );
        assert_eq!(
            SecretError::backend(SecretOperation::Delete, "prod/endpoint", "throttled").to_string(),
            "secret store delete failed for 'prod/endpoint': throttled"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(SecretError::not_found("a").is_not_found());
        assert!(!SecretError::not_found("a").is_already_exists());
        assert!(SecretError::already_exists("a").is_already_exists());
        assert_eq!(
            SecretError::access_denied("b", "nope").secret_name(),
            Some("b")
        );
        assert_eq!(SecretError::connection("", "no region").secret_name(), None);
    }
}
