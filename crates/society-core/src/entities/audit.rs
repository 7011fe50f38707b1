//! Audit log entries and the catalogue of audited actions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::admin_user::AdminUser;

macro_rules! audit_actions {
    ($($variant:ident => ($code:literal, $label:literal, $entity:literal),)+) => {
        /// Every action the admin panel records
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum AuditAction {
            $($variant,)+
        }

        impl AuditAction {
            pub const ALL: &'static [AuditAction] = &[$(AuditAction::$variant,)+];

            /// Stored action code, e.g. `notice.create`
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Human readable label used in exports, e.g. `Created Notice`
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Entity family the action applies to
            pub fn entity(&self) -> &'static str {
                match self {
                    $(Self::$variant => $entity,)+
                }
            }

            pub fn parse(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

audit_actions! {
    NoticeCreate => ("notice.create", "Created Notice", "notice"),
    NoticeUpdate => ("notice.update", "Updated Notice", "notice"),
    NoticeArchive => ("notice.archive", "Archived Notice", "notice"),
    NoticeRestore => ("notice.restore", "Restored Notice", "notice"),
    DocumentCreate => ("document.create", "Uploaded Document", "document"),
    DocumentUpdate => ("document.update", "Updated Document", "document"),
    DocumentArchive => ("document.archive", "Archived Document", "document"),
    DocumentRestore => ("document.restore", "Restored Document", "document"),
    EventCreate => ("event.create", "Created Event", "event"),
    EventUpdate => ("event.update", "Updated Event", "event"),
    EventArchive => ("event.archive", "Archived Event", "event"),
    EventRestore => ("event.restore", "Restored Event", "event"),
    GalleryCreate => ("gallery.create", "Created Album", "gallery"),
    GalleryUpdate => ("gallery.update", "Updated Album", "gallery"),
    GalleryArchive => ("gallery.archive", "Archived Album", "gallery"),
    GalleryRestore => ("gallery.restore", "Restored Album", "gallery"),
    GalleryPhotoUpload => ("gallery.photo_upload", "Uploaded Photos", "gallery"),
    GalleryPhotoDelete => ("gallery.photo_delete", "Deleted Photo", "gallery"),
    GalleryPhotoReorder => ("gallery.photo_reorder", "Reordered Photos", "gallery"),
    GalleryCoverSet => ("gallery.cover_set", "Set Album Cover", "gallery"),
    CommitteeCreate => ("committee.create", "Added Committee Member", "committee"),
    CommitteeUpdate => ("committee.update", "Updated Committee Member", "committee"),
    CommitteeArchive => ("committee.archive", "Archived Committee Member", "committee"),
    CommitteeRestore => ("committee.restore", "Restored Committee Member", "committee"),
    ContactUpdate => ("contact.update", "Updated Contact Info", "contact"),
    SettingsUpdate => ("settings.update", "Updated Settings", "settings"),
    AuthLogin => ("auth.login", "Logged In", "auth"),
    AuthLogout => ("auth.logout", "Logged Out", "auth"),
}

impl AuditAction {
    /// Label for a stored action code; unknown codes are shown as-is
    pub fn label_for(code: &str) -> &str {
        Self::parse(code).map_or(code, |action| action.label())
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user: AdminUser,
    /// Action code; kept as a string so entries written by newer versions still load
    pub action: String,
    pub entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl AuditLogEntry {
    pub fn new(user: &AdminUser, action: AuditAction, entity_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user: user.clone(),
            action: action.as_str().to_string(),
            entity: action.entity().to_string(),
            entity_id,
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details.extend(details);
        self
    }
}
