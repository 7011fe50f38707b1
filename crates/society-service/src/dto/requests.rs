//! Request DTOs for API endpoints
//!
//! JSON bodies implement `Deserialize` and `Validate`. Multipart forms are
//! collected by the API layer into the `*Form` types below. Required fields
//! default to empty strings so a missing field reports the same message as a
//! blank one.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use society_core::{NoticeStatus, Priority};
use validator::Validate;

use crate::services::{ServiceError, ServiceResult};

/// Parse a `yyyy-mm-dd` date; blank means "not given"
pub fn parse_optional_date(field: &str, value: Option<&str>) -> ServiceResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ServiceError::validation(format!("{field} must be a date (yyyy-mm-dd)"))),
    }
}

/// Accepts a date string, `null`, or an empty string
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Treats `""` as absent for optional query parameters
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|v| !v.trim().is_empty()))
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Admin login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Listing Queries
// ============================================================================

/// `?status=&category=&search=` on admin listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default, deserialize_with = "optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub search: Option<String>,
}

/// `?category=&search=` on public listings; status is fixed by the service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicListQuery {
    #[serde(default, deserialize_with = "optional_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub search: Option<String>,
}

/// Audit log filters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    #[serde(default, deserialize_with = "optional_text")]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub entity: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

/// `?limit=` on the recent activity feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

// ============================================================================
// Notice Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: String,

    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<NoticeStatus>,

    #[serde(default, deserialize_with = "optional_date")]
    pub date: Option<NaiveDate>,
}

// ============================================================================
// Document / Event Forms (multipart)
// ============================================================================

/// Text fields of the document upload form
#[derive(Debug, Clone, Default, Validate)]
pub struct DocumentForm {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: String,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Text fields of the event form
#[derive(Debug, Clone, Default, Validate)]
pub struct EventForm {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub featured: Option<String>,
}

impl EventForm {
    /// Checkbox-style flag: `true`, `on`, `1` and `yes` count as set
    pub fn is_featured(&self) -> bool {
        self.featured.as_deref().is_some_and(|v| {
            matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1" | "yes")
        })
    }
}

// ============================================================================
// Gallery Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    pub description: Option<String>,

    #[serde(default, deserialize_with = "optional_date")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPhotosRequest {
    pub photo_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetCoverRequest {
    pub photo_id: String,
}

// ============================================================================
// Committee Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitteeMemberRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Designation must be at most 100 characters"))]
    pub designation: String,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    #[serde(default, deserialize_with = "optional_date")]
    pub term_start: Option<NaiveDate>,

    #[serde(default, deserialize_with = "optional_date")]
    pub term_end: Option<NaiveDate>,

    pub display_order: Option<u32>,
}
