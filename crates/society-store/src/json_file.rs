//! Whole-file JSON access
//!
//! Reads never fail on a missing or corrupt file unless the caller asks for the
//! strict variant. Writes go to `<file>.tmp` first and are renamed over the target.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use society_core::DomainError;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::repositories::error::{io_error, serde_error};

/// Read and parse `path`, falling back to `default()` when the file is
/// missing or not valid JSON for `T`.
pub async fn read_or_default<T, F>(path: &Path, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match read_value(path).await {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unexpected document shape, using defaults");
                default()
            }
        },
        Ok(None) => default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable file, using defaults");
            default()
        }
    }
}

/// Read and parse `path`; a missing or corrupt file is an error
pub async fn read<T: DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    let bytes = fs::read(path).await.map_err(|e| io_error(path, &e))?;
    serde_json::from_slice(&bytes).map_err(|e| serde_error(path, &e))
}

/// Raw JSON content of `path`.
///
/// `Ok(None)` for a missing file and for invalid JSON (logged); other I/O
/// failures are errors.
pub async fn read_value(path: &Path) -> Result<Option<Value>, DomainError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, &e)),
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Invalid JSON, treating file as empty");
            Ok(None)
        }
    }
}

/// Raw JSON content of `path` for a read-modify-write cycle.
///
/// `Ok(None)` only for a missing file; invalid JSON is `StorageUnavailable`
/// so the caller never overwrites a file it could not read.
pub async fn read_value_strict(path: &Path) -> Result<Option<Value>, DomainError> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| serde_error(path, &e)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, &e)),
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path`
pub async fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DomainError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| serde_error(path, &e))?;
    bytes.push(b'\n');
    write_bytes(path, &bytes).await
}

/// Atomically replace `path` with `bytes`, creating parent directories
pub async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(parent, &e))?;
    }

    let tmp = temp_path(path);
    let mut file = fs::File::create(&tmp).await.map_err(|e| io_error(&tmp, &e))?;
    file.write_all(bytes).await.map_err(|e| io_error(&tmp, &e))?;
    file.sync_all().await.map_err(|e| io_error(&tmp, &e))?;
    drop(file);

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(io_error(path, &e));
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
