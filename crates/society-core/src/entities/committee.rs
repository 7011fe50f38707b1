//! Committee member entity

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::traits::Record;
use crate::value_objects::{ContentStatus, EntityKind, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
    pub id: RecordId,
    pub name: String,
    pub designation: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_end: Option<NaiveDate>,
    /// Position on the public committee page; 0 means "not yet assigned"
    #[serde(default)]
    pub display_order: u32,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCommitteeMember {
    pub name: String,
    pub designation: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub term_start: Option<NaiveDate>,
    pub term_end: Option<NaiveDate>,
    pub display_order: Option<u32>,
}

impl CommitteeMember {
    pub fn create(
        fields: NewCommitteeMember,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = fields.name.trim();
        let designation = fields.designation.trim();
        if name.is_empty() || designation.is_empty() {
            return Err(DomainError::validation("Name and designation are required"));
        }
        if let (Some(start), Some(end)) = (fields.term_start, fields.term_end) {
            if end < start {
                return Err(DomainError::validation("Term end must not be before term start"));
            }
        }

        Ok(Self {
            id: RecordId::generate(EntityKind::CommitteeMember.id_prefix(), now),
            name: name.to_string(),
            designation: designation.to_string(),
            email: fields.email.unwrap_or_default(),
            phone: fields.phone.unwrap_or_default(),
            term_start: fields.term_start,
            term_end: fields.term_end,
            display_order: fields.display_order.unwrap_or(0),
            status: ContentStatus::Active,
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
            archived_at: None,
        })
    }
}

/// Next free display position: highest existing + 1, or 1 for an empty committee
pub fn next_display_order(members: &[CommitteeMember]) -> u32 {
    members
        .iter()
        .map(|m| m.display_order)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

impl Record for CommitteeMember {
    type Status = ContentStatus;
    const KIND: EntityKind = EntityKind::CommitteeMember;

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

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.designation, &self.email]
    }

    fn default_order(a: &Self, b: &Self) -> Ordering {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    }

    fn prepare_insert(&mut self, existing: &[Self]) {
        if self.display_order == 0 {
            self.display_order = next_display_order(existing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, order: Option<u32>) -> CommitteeMember {
        CommitteeMember::create(
            NewCommitteeMember {
                name: name.into(),
                designation: "Member".into(),
                display_order: order,
                ..NewCommitteeMember::default()
            },
            "a@b.c",
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_prepare_insert_assigns_next_order() {
        let existing = vec![member("A", Some(1)), member("B", Some(4))];
        let mut new = member("C", None);
        new.prepare_insert(&existing);
        assert_eq!(new.display_order, 5);

        let mut first = member("D", None);
        first.prepare_insert(&[]);
        assert_eq!(first.display_order, 1);

        let mut explicit = member("E", Some(2));
        explicit.prepare_insert(&existing);
        assert_eq!(explicit.display_order, 2);
    }

    #[test]
    fn test_order_then_name() {
        let mut members = vec![member("Zara", Some(1)), member("Anil", Some(2)), member("Meera", Some(1))];
        members.sort_by(CommitteeMember::default_order);
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Meera", "Zara", "Anil"]);
    }

    #[test]
    fn test_term_range() {
        let err = CommitteeMember::create(
            NewCommitteeMember {
                name: "Ravi".into(),
                designation: "Treasurer".into(),
                term_start: NaiveDate::from_ymd_opt(2024, 4, 1),
                term_end: NaiveDate::from_ymd_opt(2023, 4, 1),
                ..NewCommitteeMember::default()
            },
            "a@b.c",
            Utc::now(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
