//! Mapping of `pinecone-sdk` errors onto [`ControlPlaneError`].

use pinecone_sdk::utils::errors::PineconeError;

use crate::{ControlPlaneError, ServerlessIndexSpec};

/// Operation name used in create errors.
pub(crate) const CREATE_INDEX: &str = "create_serverless_index";

/// Operation name used in delete errors.
pub(crate) const DELETE_INDEX: &str = "delete_index";

/// Map an SDK error returned while operating on `index`.
pub(crate) fn map_sdk_error(
    err: PineconeError,
    operation: &'static str,
    index: &str,
) -> ControlPlaneError {
    match err {
        PineconeError::ResourceAlreadyExistsError { .. } => {
            ControlPlaneError::index_already_exists(index)
        }
        PineconeError::IndexNotFoundError { .. } => ControlPlaneError::index_not_found(index),
        PineconeError::UnauthorizedError { .. } => ControlPlaneError::unauthorized(err.to_string()),
        other => ControlPlaneError::api(operation, format!("index '{index}': {other}")),
    }
}

/// Map an SDK error returned while creating the index described by `spec`.
///
/// A rejected request whose body mentions the dimension becomes
/// [`ControlPlaneError::InvalidDimension`].
pub(crate) fn map_create_error(
    err: PineconeError,
    spec: &ServerlessIndexSpec,
) -> ControlPlaneError {
    match err {
        PineconeError::BadRequestError { ref source }
        | PineconeError::UnprocessableEntityError { ref source }
            if mentions_dimension(&source.content) =>
        {
            ControlPlaneError::invalid_dimension(spec.dimension, source.content.trim())
        }
        other => map_sdk_error(other, CREATE_INDEX, &spec.name),
    }
}

fn mentions_dimension(content: &str) -> bool {
    content.to_ascii_lowercase().contains("dimension")
}
