//! Repository implementations
//!
//! File-backed implementations of the repository traits defined in society-core.
//! Each store owns one file (or the upload directory) and serializes its own writes.

mod audit_log;
mod collection;
mod entry;
pub(crate) mod error;
mod singleton;
mod uploads;

pub use audit_log::{JsonAuditLog, AUDIT_LOG_FILE};
pub use collection::JsonCollectionStore;
pub use singleton::{JsonSingletonStore, CONTACT_FILE, SETTINGS_FILE};
pub use uploads::DiskUploadStore;
