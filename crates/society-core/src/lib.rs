//! # society-core
//!
//! Domain layer containing content records, lifecycle states, upload policies,
//! the audit action catalogue, and repository traits.
//! This crate has zero dependencies on infrastructure (file system, web framework, etc.).

pub mod entities;
pub mod error;
pub mod patch;
pub mod traits;
pub mod upload;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AdminUser, AuditAction, AuditLogEntry, Branding, CommitteeMember, ContactInfo, Document,
    Event, Features, GalleryAlbum, NewCommitteeMember, NewDocument, NewEvent, NewGalleryAlbum,
    NewNotice, Notice, Photo, Priority, PublicSettings, Role, Settings, SocietyProfile,
    SystemSettings,
};
pub use error::DomainError;
pub use traits::{
    AuditFilter, AuditLogRepository, CollectionRepository, ListFilter, Record, RepoResult,
    SingletonRepository, StoredFile, UploadStore,
};
pub use upload::{IncomingFile, UploadPolicy};
pub use value_objects::{
    ContentStatus, EntityKind, EventStatus, Lifecycle, NoticeStatus, RecordId,
};
