//! Object storage error to HTTP error conversion.

use garden_storage::StorageError;

use crate::handler::{Error, ErrorKind};

/// Tracing target for storage error conversion.
const TRACING_TARGET: &str = "garden_server::handler::storage_error";

impl From<StorageError> for Error<'static> {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::InvalidPath(path) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    path = %path,
                    "rejected storage path"
                );
                ErrorKind::BadRequest
                    .with_message("Invalid file name")
                    .with_resource("images")
            }
            StorageError::NotFound(path) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    path = %path,
                    "object not found"
                );
                ErrorKind::NotFound.with_resource("images")
            }
            StorageError::Init(message) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %message,
                    "storage backend initialization error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            StorageError::Backend(backend_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %backend_error,
                    "storage backend error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}
