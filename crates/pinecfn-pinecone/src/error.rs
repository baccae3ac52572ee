//! Control-plane error types.

use thiserror::Error;

/// Result type for control-plane operations.
pub type ControlPlaneResult<T> = Result<T, ControlPlaneError>;

/// Control-plane errors.
#[derive(Debug, Error)]
pub enum ControlPlaneError {
    /// An index with this name already exists.
    #[error("index '{name}' already exists")]
    IndexAlreadyExists { name: String },

    /// No index with this name exists.
    #[error("index '{name}' not found")]
    IndexNotFound { name: String },

    /// The requested dimension is not accepted.
    #[error("invalid dimension {dimension}: {reason}")]
    InvalidDimension { dimension: i32, reason: String },

    /// The API key was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The client could not be constructed.
    #[error("client error: {0}")]
    Client(String),

    /// Any other API failure.
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },
}

impl ControlPlaneError {
    /// Creates an already exists error.
    pub fn index_already_exists(name: impl Into<String>) -> Self {
        Self::IndexAlreadyExists { name: name.into() }
    }

    /// Creates a not found error.
    pub fn index_not_found(name: impl Into<String>) -> Self {
        Self::IndexNotFound { name: name.into() }
    }

    /// Creates an invalid dimension error.
    pub fn invalid_dimension(dimension: i32, reason: impl Into<String>) -> Self {
        Self::InvalidDimension {
            dimension,
            reason: reason.into(),
        }
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Creates a client construction error.
    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }

    /// Creates a generic API error.
    pub fn api(operation: &'static str, msg: impl Into<String>) -> Self {
        Self::Api {
            operation,
            message: msg.into(),
        }
    }

    /// Returns `true` if the index already exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::IndexAlreadyExists { .. })
    }

    /// Returns `true` if the index was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IndexNotFound { .. })
    }
}
