//! # society-store
//!
//! Storage layer implementing the repository traits of `society-core` on top of
//! flat JSON files, plus a disk-backed store for uploaded binaries.
//!
//! ## Layout
//!
//! ```text
//! DATA_DIR/
//!   notices.json documents.json events.json gallery.json committee.json
//!   contact.json settings.json audit-log.json
//! UPLOAD_DIR/
//!   <collection>/<record id>/<uuid>.<ext>
//! ```
//!
//! Every file is rewritten whole through a temp file and a rename, so readers
//! never observe a half-written document.

pub mod json_file;
pub mod repositories;

pub use repositories::{
    DiskUploadStore, JsonAuditLog, JsonCollectionStore, JsonSingletonStore, AUDIT_LOG_FILE,
    CONTACT_FILE, SETTINGS_FILE,
};
