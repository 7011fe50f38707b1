//! Error handling utilities for the file stores
//!
//! Paths are logged here and never copied into the error, so they cannot leak
//! into API responses.

use std::path::Path;

use society_core::DomainError;
use tracing::error;

/// Convert an I/O failure on `path` to `StorageUnavailable`
pub(crate) fn io_error(path: &Path, e: &std::io::Error) -> DomainError {
    error!(path = %path.display(), error = %e, "File storage I/O failed");
    DomainError::StorageUnavailable(format!("{}: {}", file_label(path), e.kind()))
}

/// Convert a (de)serialization failure on `path` to `StorageUnavailable`
pub(crate) fn serde_error(path: &Path, e: &serde_json::Error) -> DomainError {
    error!(path = %path.display(), error = %e, "File storage encoding failed");
    DomainError::StorageUnavailable(format!("{}: malformed JSON", file_label(path)))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "file".to_string(), |name| name.to_string_lossy().into_owned())
}
