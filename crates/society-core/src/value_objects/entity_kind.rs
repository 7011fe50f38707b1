//! Entity kinds - the record collections managed by the CMS

use std::fmt;

use serde::{Deserialize, Serialize};

/// One collection of records, stored as one JSON file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Notice,
    Document,
    Event,
    #[serde(rename = "gallery")]
    GalleryAlbum,
    #[serde(rename = "committee")]
    CommitteeMember,
}

impl EntityKind {
    /// All collection kinds, in dashboard order
    pub const ALL: [EntityKind; 5] = [
        Self::Notice,
        Self::Document,
        Self::Event,
        Self::GalleryAlbum,
        Self::CommitteeMember,
    ];

    /// Prefix used when generating record ids
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Notice => "NOT",
            Self::Document => "DOC",
            Self::Event => "EVT",
            Self::GalleryAlbum => "GAL",
            Self::CommitteeMember => "COM",
        }
    }

    /// Backing file name inside the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Notice => "notices.json",
            Self::Document => "documents.json",
            Self::Event => "events.json",
            Self::GalleryAlbum => "gallery.json",
            Self::CommitteeMember => "committee.json",
        }
    }

    /// Collection name used in URLs and upload directories
    pub fn collection(self) -> &'static str {
        match self {
            Self::Notice => "notices",
            Self::Document => "documents",
            Self::Event => "events",
            Self::GalleryAlbum => "gallery",
            Self::CommitteeMember => "committee",
        }
    }

    /// Field name of the wrapped legacy file shape `{ "<field>": [...] }`
    pub fn legacy_field(self) -> &'static str {
        match self {
            Self::Notice => "notices",
            Self::Document => "documents",
            Self::Event => "events",
            Self::GalleryAlbum => "albums",
            Self::CommitteeMember => "members",
        }
    }

    /// Entity name recorded in audit entries
    pub fn audit_entity(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Document => "document",
            Self::Event => "event",
            Self::GalleryAlbum => "gallery",
            Self::CommitteeMember => "committee",
        }
    }

    /// Title-case name used in human readable labels
    pub fn title(self) -> &'static str {
        match self {
            Self::Notice => "Notice",
            Self::Document => "Document",
            Self::Event => "Event",
            Self::GalleryAlbum => "Gallery Album",
            Self::CommitteeMember => "Committee Member",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Notice => "Notice",
            Self::Document => "Document",
            Self::Event => "Event",
            Self::GalleryAlbum => "Gallery album",
            Self::CommitteeMember => "Committee member",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        let mut prefixes: Vec<_> = EntityKind::ALL.iter().map(|k| k.id_prefix()).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_serde_names_match_audit_entities() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.audit_entity()));
        }
    }
}
