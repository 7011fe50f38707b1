//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the storage layer
//! provides the implementation (flat JSON files in production).

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::AuditLogEntry;
use crate::error::DomainError;
use crate::upload::IncomingFile;
use crate::value_objects::{EntityKind, RecordId};

use super::record::{ListFilter, Record};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Record Collections
// ============================================================================

/// One collection of soft-deletable records
#[async_trait]
pub trait CollectionRepository<T: Record>: Send + Sync {
    /// List records matching the filter in the collection's default order
    async fn list(&self, filter: &ListFilter) -> RepoResult<Vec<T>>;

    /// Find a record by id
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>>;

    /// Hand out an id no stored or reserved record uses, for records whose
    /// files must be written before the record itself
    async fn reserve_id(&self) -> RepoResult<RecordId>;

    /// Drop a reservation that will never be used
    async fn release_id(&self, id: &RecordId);

    /// Append a new, fully defaulted record. Its id is replaced when it is
    /// malformed or clashes with a stored or reserved id.
    async fn create(&self, record: T) -> RepoResult<T>;

    /// Append a record carrying an id from `reserve_id`, consuming the
    /// reservation; `InvalidState` if the id was not reserved
    async fn create_reserved(&self, record: T) -> RepoResult<T>;

    /// Merge a patch over an existing record, keeping its immutable fields
    async fn update(&self, id: &str, patch: &Map<String, Value>) -> RepoResult<T>;

    /// Soft-delete a record
    async fn archive(&self, id: &str) -> RepoResult<T>;

    /// Restore an archived record
    async fn restore(&self, id: &str) -> RepoResult<T>;

    /// Replace a stored record wholesale (same id)
    async fn replace(&self, record: T) -> RepoResult<T>;
}

// ============================================================================
// Singleton Documents
// ============================================================================

/// A single JSON document such as contact info or site settings
#[async_trait]
pub trait SingletonRepository<T>: Send + Sync
where
    T: Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Current value, or `T::default()` when nothing has been stored yet
    async fn get(&self) -> RepoResult<T>;

    /// Overwrite the stored value
    async fn put(&self, value: &T) -> RepoResult<()>;

    /// Deep-merge a partial document over the stored value and persist it,
    /// stamping `updatedAt` / `updatedBy`
    async fn update(&self, patch: &Map<String, Value>, updated_by: &str) -> RepoResult<T>;
}

// ============================================================================
// Audit Log
// ============================================================================

/// Filters for audit queries; all present filters must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFilter {
    /// Matches the acting user's id or email
    pub user: Option<String>,
    pub action: Option<String>,
    pub entity: Option<String>,
    /// Inclusive first day
    pub start_date: Option<NaiveDate>,
    /// Inclusive last day
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl AuditFilter {
    /// Whether an entry satisfies every present filter (ignores `limit`)
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        if let Some(user) = self.user.as_deref() {
            if entry.user.id != user && !entry.user.email.eq_ignore_ascii_case(user) {
                return false;
            }
        }
        if let Some(action) = self.action.as_deref() {
            if entry.action != action {
                return false;
            }
        }
        if let Some(entity) = self.entity.as_deref() {
            if entry.entity != entity {
                return false;
            }
        }
        let day = entry.timestamp.date_naive();
        if self.start_date.is_some_and(|start| day < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| day > end) {
            return false;
        }
        true
    }
}

/// Append-only, bounded, newest-first log of admin actions
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Prepend an entry, dropping the oldest beyond the cap
    async fn append(&self, entry: AuditLogEntry) -> RepoResult<()>;

    /// The newest `limit` entries
    async fn recent(&self, limit: usize) -> RepoResult<Vec<AuditLogEntry>>;

    /// Entries matching the filter, newest first, truncated to `filter.limit`
    async fn query(&self, filter: &AuditFilter) -> RepoResult<Vec<AuditLogEntry>>;
}

// ============================================================================
// Uploaded Files
// ============================================================================

/// A binary payload written by an `UploadStore`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Path relative to the upload root, using `/` separators
    pub path: String,
    /// Generated file name on disk
    pub stored_name: String,
    /// Size in bytes
    pub size: u64,
}

/// Storage for uploaded binaries, kept apart from record metadata
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Write a payload under the directory of the owning record
    async fn save(
        &self,
        kind: EntityKind,
        record_id: &RecordId,
        file: &IncomingFile,
    ) -> RepoResult<StoredFile>;

    /// Physically delete a previously stored payload; missing files are ignored
    async fn delete(&self, relative_path: &str) -> RepoResult<()>;
}
