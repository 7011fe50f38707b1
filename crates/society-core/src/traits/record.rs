//! The `Record` trait - what the collection store needs to know about an entity

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DomainError;
use crate::value_objects::{EntityKind, Lifecycle, RecordId};

/// A persisted collection record with a soft-delete lifecycle
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Tagged status type of this record
    type Status: Lifecycle;

    /// Collection this record belongs to
    const KIND: EntityKind;

    fn id(&self) -> &RecordId;

    fn set_id(&mut self, id: RecordId);

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);

    fn set_updated_at(&mut self, at: DateTime<Utc>);

    fn set_archived_at(&mut self, at: Option<DateTime<Utc>>);

    /// Category used by equality filtering, if the entity has one
    fn category(&self) -> Option<&str> {
        None
    }

    /// Text fields covered by free-text search
    fn search_fields(&self) -> Vec<&str>;

    /// Default listing order of the collection
    fn default_order(a: &Self, b: &Self) -> Ordering;

    /// Hook run under the store's write lock before a new record is appended
    fn prepare_insert(&mut self, _existing: &[Self]) {}

    /// Soft-delete. The current status is not checked.
    fn archive(&mut self, now: DateTime<Utc>) {
        self.set_status(Self::Status::ARCHIVED);
        self.set_archived_at(Some(now));
        self.set_updated_at(now);
    }

    /// Return an archived record to its kind's restored status
    fn restore(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.status().is_archived() {
            return Err(DomainError::InvalidState(format!(
                "Only archived records can be restored ({} {} is {})",
                Self::KIND,
                self.id(),
                self.status()
            )));
        }
        self.set_status(Self::Status::RESTORED);
        self.set_archived_at(None);
        self.set_updated_at(now);
        Ok(())
    }

    /// Whether the record matches a list filter
    fn matches(&self, filter: &ListFilter) -> bool {
        if let Some(status) = filter.status.as_deref() {
            if self.status().as_str() != status {
                return false;
            }
        }
        if let Some(category) = filter.category.as_deref() {
            if self.category() != Some(category) {
                return false;
            }
        }
        if let Some(search) = filter.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty()
                && !self
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}

/// Equality and free-text filters applied by `CollectionRepository::list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ListFilter {
    /// Filter matching one status only
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Replace the status filter
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replace the category filter
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replace the search text
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Order by `date` descending, ties broken by newest creation first
pub fn newest_first<D: Ord>(
    a_date: D,
    a_created: DateTime<Utc>,
    b_date: D,
    b_created: DateTime<Utc>,
) -> Ordering {
    b_date.cmp(&a_date).then_with(|| b_created.cmp(&a_created))
}
