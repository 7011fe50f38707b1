//! Document entity - downloadable PDFs (bylaws, minutes, circulars)

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::traits::{newest_first, Record, StoredFile};
use crate::value_objects::{ContentStatus, EntityKind, RecordId};

/// Document metadata; the PDF itself lives in the upload store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

/// Caller supplied fields for a new document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl Document {
    /// Fields that only upload handling may set
    pub const FILE_FIELDS: [&'static str; 3] = ["filePath", "fileName", "fileSize"];

    /// Build document metadata; the file is attached afterwards
    pub fn create(
        fields: NewDocument,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = fields.title.trim();
        let category = fields.category.trim();
        if title.is_empty() || category.is_empty() {
            return Err(DomainError::validation("Title and category are required"));
        }

        Ok(Self {
            id: RecordId::generate(EntityKind::Document.id_prefix(), now),
            title: title.to_string(),
            category: category.to_string(),
            description: fields.description.unwrap_or_default(),
            date: fields.date.unwrap_or_else(|| now.date_naive()),
            file_path: String::new(),
            file_name: String::new(),
            file_size: 0,
            status: ContentStatus::Active,
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
            archived_at: None,
        })
    }

    /// Record where the uploaded PDF was stored
    pub fn attach_file(&mut self, stored: &StoredFile, original_name: &str) {
        self.file_path.clone_from(&stored.path);
        self.file_name = original_name.to_string();
        self.file_size = stored.size;
    }
}

impl Record for Document {
    type Status = ContentStatus;
    const KIND: EntityKind = EntityKind::Document;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn status(&self) -> ContentStatus {
        self.status
    }

    fn set_status(&mut self, status: ContentStatus) {
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
        vec![&self.title, &self.description, &self.category, &self.file_name]
    }

    fn default_order(a: &Self, b: &Self) -> Ordering {
        newest_first(a.date, a.created_at, b.date, b.created_at)
    }
}
