//! Notice entity - announcements shown on the notice board

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::traits::{newest_first, Record};
use crate::value_objects::{EntityKind, Lifecycle, NoticeStatus, RecordId};

/// Notice priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// Notice entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
    pub status: NoticeStatus,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

/// Caller supplied fields for a new notice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNotice {
    pub title: String,
    pub category: String,
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<NoticeStatus>,
    pub date: Option<NaiveDate>,
}

impl Notice {
    /// Build a notice from caller fields over the notice defaults
    /// (`content=""`, `priority=normal`, `status=draft`, `date=today`).
    pub fn create(
        fields: NewNotice,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = fields.title.trim();
        let category = fields.category.trim();
        if title.is_empty() || category.is_empty() {
            return Err(DomainError::validation("Title and category are required"));
        }
        let status = fields.status.unwrap_or_default();
        if status.is_archived() {
            return Err(DomainError::validation("A new notice cannot be archived"));
        }

        Ok(Self {
            id: RecordId::generate(EntityKind::Notice.id_prefix(), now),
            title: title.to_string(),
            category: category.to_string(),
            content: fields.content.unwrap_or_default(),
            priority: fields.priority.unwrap_or_default(),
            status,
            date: fields.date.unwrap_or_else(|| now.date_naive()),
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
            archived_at: None,
        })
    }
}

impl Record for Notice {
    type Status = NoticeStatus;
    const KIND: EntityKind = EntityKind::Notice;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn status(&self) -> NoticeStatus {
        self.status
    }

    fn set_status(&mut self, status: NoticeStatus) {
        self.status = status;
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn set_archived_at(&mut self, at: Option<DateTime<Utc>>) {
        self.archived_at = at;
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.content, &self.category]
    }

    fn default_order(a: &Self, b: &Self) -> Ordering {
        newest_first(a.date, a.created_at, b.date, b.created_at)
    }
}
