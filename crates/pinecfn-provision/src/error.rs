//! Provisioning error types.

use pinecfn_pinecone::ControlPlaneError;
use pinecfn_secrets::SecretError;
use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

use crate::provisioner::Stage;
use crate::request::ParameterError;

/// Type alias for Results with the provisioning [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of provisioning errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed resource property.
    Parameter,
    /// API key could not be fetched or parsed.
    Credential,
    /// Index create or delete failed.
    ControlPlane,
    /// Endpoint secret create or delete failed.
    SecretStore,
    /// Unrecognized request type.
    Dispatch,
}

/// Provisioning errors.
///
/// Each variant keeps the underlying failure as its source, so the whole
/// chain is available through [`Error::report`].
#[derive(Debug, Error)]
pub enum Error {
    /// Resource properties are invalid.
    #[error("invalid resource properties")]
    Parameter(#[from] ParameterError),

    /// API key resolution failed.
    #[error("failed to resolve API key from secret '{secret}'")]
    Credential {
        secret: String,
        #[source]
        source: SecretError,
    },

    /// A control-plane call failed.
    #[error("control-plane step '{stage}' failed for index '{index}'")]
    ControlPlane {
        stage: Stage,
        index: String,
        #[source]
        source: ControlPlaneError,
    },

    /// An endpoint secret call failed.
    #[error("secret store step '{stage}' failed for secret '{secret}'")]
    SecretStore {
        stage: Stage,
        secret: String,
        #[source]
        source: SecretError,
    },

    /// The request type is neither `Create` nor `Delete`.
    #[error("unknown request type '{0}'")]
    UnknownRequestType(String),
}

impl Error {
    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parameter(_) => ErrorKind::Parameter,
            Self::Credential { .. } => ErrorKind::Credential,
            Self::ControlPlane { .. } => ErrorKind::ControlPlane,
            Self::SecretStore { .. } => ErrorKind::SecretStore,
            Self::UnknownRequestType(_) => ErrorKind::Dispatch,
        }
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind().into()
    }

    /// Returns the control-plane cause, if any.
    pub fn control_plane_error(&self) -> Option<&ControlPlaneError> {
        match self {
            Self::ControlPlane { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns the secret store cause, if any.
    pub fn secret_error(&self) -> Option<&SecretError> {
        match self {
            Self::Credential { source, .. } | Self::SecretStore { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Formats the error and all of its sources as `outer: inner: root`.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            report.push_str(": ");
            report.push_str(&cause.to_string());
            source = cause.source();
        }
        report
    }
}
