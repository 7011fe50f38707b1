//! Domain entities

mod admin_user;
mod audit;
mod committee;
mod contact;
mod document;
mod event;
mod gallery;
mod notice;
mod settings;

pub use admin_user::{AdminUser, Role};
pub use audit::{AuditAction, AuditLogEntry};
pub use committee::{next_display_order, CommitteeMember, NewCommitteeMember};
pub use contact::ContactInfo;
pub use document::{Document, NewDocument};
pub use event::{Event, NewEvent};
pub use gallery::{GalleryAlbum, NewGalleryAlbum, Photo};
pub use notice::{NewNotice, Notice, Priority};
pub use settings::{Branding, Features, PublicSettings, Settings, SocietyProfile, SystemSettings};
