//! JSON file implementation of CollectionRepository
//!
//! Reads are forgiving: a missing or corrupt file lists as empty and entries
//! that do not deserialize are skipped. Writes are not: entries the store
//! cannot type are written back untouched, and a file that cannot be parsed
//! fails the mutation instead of being overwritten.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use society_core::entities::{next_display_order, CommitteeMember};
use society_core::error::DomainError;
use society_core::patch::merge_record;
use society_core::traits::{CollectionRepository, ListFilter, Record, RepoResult};
use society_core::value_objects::RecordId;

use super::entry::Entry;
use crate::json_file;

impl<T: Record> Entry<T> {
    fn raw_id(&self) -> Option<&str> {
        match self {
            Self::Record(record) => Some(record.id().as_str()),
            Self::Unreadable(item) => item.get("id").and_then(Value::as_str),
        }
    }
}

/// One record collection stored as a JSON array in `<data_dir>/<kind file>`
pub struct JsonCollectionStore<T> {
    path: PathBuf,
    /// Serializes writes; holds ids handed out by `reserve_id` but not yet created
    write_lock: Mutex<HashSet<RecordId>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> JsonCollectionStore<T> {
    /// Create a store for `T` inside `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(T::KIND.file_name()),
            write_lock: Mutex::new(HashSet::new()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Array elements of either the bare or the wrapped `{ "<field>": [...] }` shape
    fn unwrap_items(value: Value) -> Option<Vec<Value>> {
        match value {
            Value::Array(items) => Some(items),
            Value::Object(mut wrapper) => match wrapper.remove(T::KIND.legacy_field()) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    }

    /// Every well-formed record, for read paths
    async fn load(&self) -> RepoResult<Vec<T>> {
        let Some(value) = json_file::read_value(&self.path).await? else {
            return Ok(Vec::new());
        };
        let Some(items) = Self::unwrap_items(value) else {
            warn!(file = T::KIND.file_name(), "Collection file has no record array");
            return Ok(Vec::new());
        };

        let total = items.len();
        let records: Vec<T> = items
            .into_iter()
            .filter_map(|item| Entry::<T>::parse(item, T::KIND.file_name()).into_record())
            .collect();

        if records.len() != total {
            debug!(kept = records.len(), total, "Loaded collection with skipped entries");
        }
        Ok(records)
    }

    /// Every entry, typed where possible, for a read-modify-write cycle
    async fn load_for_write(&self) -> RepoResult<Vec<Entry<T>>> {
        let Some(value) = json_file::read_value_strict(&self.path).await? else {
            return Ok(Vec::new());
        };
        let items = Self::unwrap_items(value).ok_or_else(|| {
            warn!(file = T::KIND.file_name(), "Refusing to rewrite a collection file with no record array");
            DomainError::StorageUnavailable(format!("{}: unexpected shape", T::KIND.file_name()))
        })?;
        Ok(items
            .into_iter()
            .map(|item| Entry::parse(item, T::KIND.file_name()))
            .collect())
    }

    async fn save(&self, entries: &[Entry<T>]) -> RepoResult<()> {
        json_file::write(&self.path, entries).await
    }

    fn typed(entries: &[Entry<T>]) -> Vec<T> {
        entries.iter().filter_map(Entry::record).cloned().collect()
    }

    /// Load, mutate one record in place, save, and return the new value
    async fn modify<F>(&self, id: &str, change: F) -> RepoResult<T>
    where
        F: FnOnce(&mut T) -> RepoResult<()> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_for_write().await?;
        let record = entries
            .iter_mut()
            .find_map(|entry| match entry {
                Entry::Record(record) if record.id().as_str() == id => Some(record),
                _ => None,
            })
            .ok_or_else(|| DomainError::not_found(T::KIND, id))?;

        change(record)?;
        let updated = record.clone();
        self.save(&entries).await?;
        Ok(updated)
    }
}

impl JsonCollectionStore<CommitteeMember> {
    /// Display position a new member would get
    pub async fn next_display_order(&self) -> RepoResult<u32> {
        Ok(next_display_order(&self.load().await?))
    }
}

#[async_trait]
impl<T: Record> CollectionRepository<T> for JsonCollectionStore<T> {
    #[instrument(skip(self), fields(kind = %T::KIND))]
    async fn list(&self, filter: &ListFilter) -> RepoResult<Vec<T>> {
        let mut records: Vec<T> = self
            .load()
            .await?
            .into_iter()
            .filter(|r| r.matches(filter))
            .collect();
        records.sort_by(T::default_order);
        Ok(records)
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|r| r.id().as_str() == id))
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    async fn reserve_id(&self) -> RepoResult<RecordId> {
        let mut reserved = self.write_lock.lock().await;
        let entries = self.load_for_write().await?;

        let id = RecordId::generate_unique(T::KIND.id_prefix(), Utc::now(), |candidate| {
            reserved.contains(&RecordId::from(candidate))
                || entries.iter().any(|e| e.raw_id() == Some(candidate))
        });
        reserved.insert(id.clone());
        debug!(%id, "Reserved record id");
        Ok(id)
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    async fn release_id(&self, id: &RecordId) {
        if self.write_lock.lock().await.remove(id) {
            debug!(%id, "Released record id");
        }
    }

    #[instrument(skip(self, record), fields(kind = %T::KIND))]
    async fn create(&self, mut record: T) -> RepoResult<T> {
        let reserved = self.write_lock.lock().await;
        let mut entries = self.load_for_write().await?;

        let taken = |candidate: &str| {
            reserved.contains(&RecordId::from(candidate))
                || entries.iter().any(|e| e.raw_id() == Some(candidate))
        };
        if taken(record.id().as_str()) || !record.id().matches_format(T::KIND.id_prefix()) {
            let id = RecordId::generate_unique(T::KIND.id_prefix(), Utc::now(), taken);
            debug!(requested = %record.id(), assigned = %id, "Reassigned record id");
            record.set_id(id);
        }

        record.prepare_insert(&Self::typed(&entries));
        entries.push(Entry::Record(record.clone()));
        self.save(&entries).await?;
        Ok(record)
    }

    #[instrument(skip(self, record), fields(kind = %T::KIND, id = %record.id()))]
    async fn create_reserved(&self, mut record: T) -> RepoResult<T> {
        let mut reserved = self.write_lock.lock().await;
        if !reserved.remove(record.id()) {
            return Err(DomainError::InvalidState(format!(
                "Record id {} was not reserved",
                record.id()
            )));
        }
        let mut entries = self.load_for_write().await?;

        record.prepare_insert(&Self::typed(&entries));
        entries.push(Entry::Record(record.clone()));
        self.save(&entries).await?;
        Ok(record)
    }

    #[instrument(skip(self, patch), fields(kind = %T::KIND))]
    async fn update(&self, id: &str, patch: &Map<String, Value>) -> RepoResult<T> {
        self.modify(id, |record| {
            *record = merge_record(record, patch, Utc::now())?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    async fn archive(&self, id: &str) -> RepoResult<T> {
        self.modify(id, |record| {
            record.archive(Utc::now());
            Ok(())
        })
        .await
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    async fn restore(&self, id: &str) -> RepoResult<T> {
        self.modify(id, |record| record.restore(Utc::now())).await
    }

    #[instrument(skip(self, record), fields(kind = %T::KIND, id = %record.id()))]
    async fn replace(&self, mut record: T) -> RepoResult<T> {
        let id = record.id().as_str().to_string();
        self.modify(&id, move |stored| {
            record.set_updated_at(Utc::now());
            *stored = record;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use society_core::entities::{NewNotice, Notice};

    #[tokio::test]
    async fn test_malformed_ids_are_regenerated() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCollectionStore::<Notice>::new(dir.path());

        let mut notice = Notice::create(
            NewNotice {
                title: "Lift maintenance".into(),
                category: "maintenance".into(),
                ..NewNotice::default()
            },
            "a@b.c",
            Utc::now(),
        )
        .unwrap();
        notice.id = RecordId::new("whatever");

        let created = store.create(notice).await.unwrap();
        assert!(created.id.matches_format("NOT"));
    }

    fn draft(title: &str) -> Notice {
        Notice::create(
            NewNotice {
                title: title.into(),
                category: "general".into(),
                ..NewNotice::default()
            },
            "a@b.c",
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_reserved_ids_are_kept_and_never_reused() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCollectionStore::<Notice>::new(dir.path());

        let first = store.reserve_id().await.unwrap();
        let second = store.reserve_id().await.unwrap();
        assert_ne!(first, second);

        // An unreserved create never takes a reserved id
        let mut plain = draft("Plain");
        plain.id = first.clone();
        let plain = store.create(plain).await.unwrap();
        assert_ne!(plain.id, first);
        assert_ne!(plain.id, second);

        let mut reserved = draft("Reserved");
        reserved.id = second.clone();
        assert_eq!(store.create_reserved(reserved.clone()).await.unwrap().id, second);
        // A reservation is consumed once
        assert!(store.create_reserved(reserved).await.unwrap_err().is_invalid_state());

        store.release_id(&first).await;
        assert!(store.write_lock.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_entries_survive_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCollectionStore::<Notice>::new(dir.path());
        let legacy = serde_json::json!({
            "id": "NOT-20230101000000",
            "title": "Legacy",
            "status": "inactive"
        });
        json_file::write(store.path(), &vec![legacy.clone()]).await.unwrap();

        let created = store.create(draft("Fresh")).await.unwrap();
        store.archive(created.id.as_str()).await.unwrap();

        let raw: Vec<Value> = json_file::read(store.path()).await.unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0], legacy);
        assert_eq!(store.list(&ListFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_mutations_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCollectionStore::<Notice>::new(dir.path());
        tokio::fs::write(store.path(), b"[{,,").await.unwrap();

        let err = store.create(draft("Lost?")).await.unwrap_err();
        assert!(matches!(err, DomainError::StorageUnavailable(_)));
        assert_eq!(tokio::fs::read(store.path()).await.unwrap(), b"[{,,");
        assert!(store.list(&ListFilter::default()).await.unwrap().is_empty());
    }
}
