//! Traits (ports) implemented by the storage layer

mod record;
mod repositories;

pub use record::{newest_first, ListFilter, Record};
pub use repositories::{
    AuditFilter, AuditLogRepository, CollectionRepository, RepoResult, SingletonRepository,
    StoredFile, UploadStore,
};
