//! Lifecycle states of content records
//!
//! Each collection has its own tagged status. The transition table is shared:
//!
//! | From       | Operation | To                         |
//! |------------|-----------|----------------------------|
//! | any        | archive   | `archived`                 |
//! | `archived` | restore   | the kind's restored status |
//! | other      | restore   | rejected (`InvalidState`)  |
//!
//! Archive deliberately does not look at the current status.
//! Unknown status strings fail deserialization.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Behaviour shared by every record status enum
pub trait Lifecycle:
    Copy + Eq + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Soft-deleted state
    const ARCHIVED: Self;
    /// State a record returns to when restored
    const RESTORED: Self;
    /// State shown on the public site
    const PUBLIC: Self;

    /// Wire name of the status
    fn as_str(&self) -> &'static str;

    /// Parse a wire name, `None` for unknown strings
    fn parse(value: &str) -> Option<Self>;

    fn is_archived(&self) -> bool {
        *self == Self::ARCHIVED
    }

    fn is_public(&self) -> bool {
        *self == Self::PUBLIC
    }
}

/// Notice status: drafts are restorable targets, active notices are public
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

impl Lifecycle for NoticeStatus {
    const ARCHIVED: Self = Self::Archived;
    const RESTORED: Self = Self::Draft;
    const PUBLIC: Self = Self::Active;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Event status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Published,
    Archived,
}

impl Lifecycle for EventStatus {
    const ARCHIVED: Self = Self::Archived;
    const RESTORED: Self = Self::Published;
    const PUBLIC: Self = Self::Published;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Status of documents, gallery albums and committee members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Active,
    Archived,
}

impl Lifecycle for ContentStatus {
    const ARCHIVED: Self = Self::Archived;
    const RESTORED: Self = Self::Active;
    const PUBLIC: Self = Self::Active;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl fmt::Display for NoticeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
