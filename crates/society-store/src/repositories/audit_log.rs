//! JSON file implementation of AuditLogRepository

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use society_core::entities::AuditLogEntry;
use society_core::error::DomainError;
use society_core::traits::{AuditFilter, AuditLogRepository, RepoResult};

use super::entry::Entry;
use crate::json_file;

pub const AUDIT_LOG_FILE: &str = "audit-log.json";

/// Field name of the wrapped legacy shape `{ "logs": [...] }`
const LEGACY_FIELD: &str = "logs";

/// Newest-first audit log capped at `max_entries`
pub struct JsonAuditLog {
    path: PathBuf,
    max_entries: usize,
    write_lock: Mutex<()>,
}

impl JsonAuditLog {
    pub fn new(data_dir: &Path, max_entries: usize) -> Self {
        Self {
            path: data_dir.join(AUDIT_LOG_FILE),
            max_entries: max_entries.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Array elements of either the bare or the wrapped `{ "logs": [...] }` shape
    fn unwrap_items(value: Value) -> Option<Vec<Value>> {
        match value {
            Value::Array(items) => Some(items),
            Value::Object(mut wrapper) => match wrapper.remove(LEGACY_FIELD) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    }

    /// Every readable entry, for queries
    async fn load(&self) -> RepoResult<Vec<AuditLogEntry>> {
        let items = json_file::read_value(&self.path)
            .await?
            .and_then(Self::unwrap_items)
            .unwrap_or_default();

        Ok(items
            .into_iter()
            .filter_map(|item| Entry::parse(item, AUDIT_LOG_FILE).into_record())
            .collect())
    }

    /// Every entry, unreadable ones kept raw, for an append.
    ///
    /// A file that exists but cannot be parsed is an error, never overwritten.
    async fn load_for_write(&self) -> RepoResult<Vec<Entry<AuditLogEntry>>> {
        let Some(value) = json_file::read_value_strict(&self.path).await? else {
            return Ok(Vec::new());
        };
        let items = Self::unwrap_items(value).ok_or_else(|| {
            warn!(file = AUDIT_LOG_FILE, "Refusing to rewrite an audit log with no entry array");
            DomainError::StorageUnavailable(format!("{AUDIT_LOG_FILE}: unexpected shape"))
        })?;
        Ok(items
            .into_iter()
            .map(|item| Entry::parse(item, AUDIT_LOG_FILE))
            .collect())
    }
}

#[async_trait]
impl AuditLogRepository for JsonAuditLog {
    #[instrument(skip(self, entry), fields(action = %entry.action))]
    async fn append(&self, entry: AuditLogEntry) -> RepoResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_for_write().await?;
        entries.insert(0, Entry::Record(entry));
        entries.truncate(self.max_entries);
        json_file::write(&self.path, &entries).await
    }

    async fn recent(&self, limit: usize) -> RepoResult<Vec<AuditLogEntry>> {
        let mut entries = self.load().await?;
        entries.truncate(limit);
        Ok(entries)
    }

    #[instrument(skip(self))]
    async fn query(&self, filter: &AuditFilter) -> RepoResult<Vec<AuditLogEntry>> {
        let matching = self
            .load()
            .await?
            .into_iter()
            .filter(|entry| filter.matches(entry));

        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}
