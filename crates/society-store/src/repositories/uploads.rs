//! Disk implementation of UploadStore
//!
//! Binaries live under `<root>/<collection>/<record id>/<uuid>.<ext>`; records
//! only keep the relative path.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use society_core::error::DomainError;
use society_core::traits::{RepoResult, StoredFile, UploadStore};
use society_core::upload::IncomingFile;
use society_core::value_objects::{EntityKind, RecordId};

use super::error::io_error;
use crate::json_file;

/// Upload store rooted at `UPLOAD_DIR`
#[derive(Debug, Clone)]
pub struct DiskUploadStore {
    root: PathBuf,
}

impl DiskUploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if needed
    pub async fn initialize(&self) -> RepoResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error(&self.root, &e))?;
        info!(root = %self.root.display(), "Upload store initialized");
        Ok(())
    }

    /// Absolute path of a stored relative path, refusing anything that escapes the root
    pub fn resolve(&self, relative_path: &str) -> Option<PathBuf> {
        let relative = Path::new(relative_path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        (safe && !relative_path.is_empty()).then(|| self.root.join(relative))
    }
}

/// Extension for the stored file: the client's if it is plain alphanumeric,
/// else one derived from the content type
fn stored_extension(file: &IncomingFile) -> Option<String> {
    file.extension()
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .or_else(|| {
            file.effective_content_type()
                .and_then(|ct| mime_guess::get_mime_extensions_str(&ct))
                .and_then(|exts| exts.first())
                .map(|ext| (*ext).to_string())
        })
}

#[async_trait]
impl UploadStore for DiskUploadStore {
    #[instrument(skip(self, file), fields(%kind, %record_id, size = file.size()))]
    async fn save(
        &self,
        kind: EntityKind,
        record_id: &RecordId,
        file: &IncomingFile,
    ) -> RepoResult<StoredFile> {
        let id = record_id.as_str();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomainError::validation(format!("Invalid record id: {id}")));
        }

        let stem = Uuid::new_v4().simple().to_string();
        let stored_name = match stored_extension(file) {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        };
        let relative = format!("{}/{id}/{stored_name}", kind.collection());

        json_file::write_bytes(&self.root.join(&relative), &file.bytes).await?;
        debug!(path = %relative, "Stored upload");

        Ok(StoredFile {
            path: relative,
            stored_name,
            size: file.size(),
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, relative_path: &str) -> RepoResult<()> {
        let Some(path) = self.resolve(relative_path) else {
            warn!(path = %relative_path, "Refusing to delete path outside the upload root");
            return Ok(());
        };

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %relative_path, "Upload already gone");
                return Ok(());
            }
            Err(e) => return Err(io_error(&path, &e)),
        }

        // Drop the record directory once its last file is gone
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent).await;
        }
        Ok(())
    }
}
