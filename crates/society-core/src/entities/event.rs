//! Event entity - society functions, meetings and festivals

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::traits::{newest_first, Record};
use crate::value_objects::{EntityKind, EventStatus, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

/// Caller supplied fields for a new event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub featured: bool,
}

impl Event {
    /// Fields that only upload handling may set
    pub const FILE_FIELDS: [&'static str; 1] = ["imagePath"];

    /// Build a published event; title, category and date are required
    pub fn create(
        fields: NewEvent,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = fields.title.trim();
        let category = fields.category.trim();
        let date = match fields.date {
            Some(date) if !title.is_empty() && !category.is_empty() => date,
            _ => {
                return Err(DomainError::validation(
                    "Title, category and date are required",
                ))
            }
        };

        Ok(Self {
            id: RecordId::generate(EntityKind::Event.id_prefix(), now),
            title: title.to_string(),
            category: category.to_string(),
            date,
            time: fields.time.unwrap_or_default(),
            location: fields.location.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            featured: fields.featured,
            image_path: None,
            status: EventStatus::Published,
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
            archived_at: None,
        })
    }

    /// Upcoming relative to `today` (inclusive)
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

impl Record for Event {
    type Status = EventStatus;
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn status(&self) -> EventStatus {
        self.status
    }

    fn set_status(&mut self, status: EventStatus) {
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
        vec![&self.title, &self.description, &self.location, &self.category]
    }

    fn default_order(a: &Self, b: &Self) -> Ordering {
        newest_first(a.date, a.created_at, b.date, b.created_at)
    }
}
