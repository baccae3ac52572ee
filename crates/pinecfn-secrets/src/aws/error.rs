//! Mapping of Secrets Manager SDK errors onto [`SecretError`].

use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::{SecretError, SecretOperation};

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";
const RESOURCE_EXISTS: &str = "ResourceExistsException";
const ACCESS_DENIED: &str = "AccessDeniedException";

/// Map an SDK error to [`SecretError`], classifying by error code and HTTP status.
pub(crate) fn map_sdk_error<E>(
    err: SdkError<E>,
    operation: SecretOperation,
    name: &str,
) -> SecretError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match &err {
        SdkError::ServiceError(service_err) => {
            let status = service_err.raw().status().as_u16();
            let code = service_err.err().code();
            let message = service_err
                .err()
                .message()
                .map(str::to_owned)
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
            classify(operation, name, code, status, message)
        }
        SdkError::TimeoutError(_) => SecretError::backend(
            operation,
            name,
            format!("timeout: {}", DisplayErrorContext(&err)),
        ),
        SdkError::DispatchFailure(_) => SecretError::backend(
            operation,
            name,
            format!("connection error: {}", DisplayErrorContext(&err)),
        ),
        _ => SecretError::backend(operation, name, DisplayErrorContext(&err).to_string()),
    }
}

/// Classify a service error response.
fn classify(
    operation: SecretOperation,
    name: &str,
    code: Option<&str>,
    status: u16,
    message: String,
) -> SecretError {
    match (code, status) {
        (Some(RESOURCE_NOT_FOUND), _) => SecretError::not_found(name),
        (Some(RESOURCE_EXISTS), _) => SecretError::already_exists(name),
        (Some(ACCESS_DENIED), _) | (_, 403) => SecretError::access_denied(name, message),
        (code, status) => SecretError::backend(
            operation,
            name,
            format!("{} (HTTP {status}): {message}", code.unwrap_or("unknown error")),
        ),
    }
}
