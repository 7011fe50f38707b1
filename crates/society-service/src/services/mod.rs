//! Business logic services
//!
//! This module contains the service layer: validation, schema defaulting,
//! file handling and audit emission around the repository ports.

pub mod audit;
pub mod auth;
pub mod committee;
pub mod context;
pub mod document;
pub mod error;
pub mod event;
pub mod gallery;
pub mod notice;
pub mod records;
pub mod site;
pub mod stats;

// Re-export all services for convenience
pub use audit::AuditService;
pub use auth::AuthService;
pub use committee::CommitteeService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use document::DocumentService;
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use gallery::GalleryService;
pub use notice::NoticeService;
pub use records::{LifecycleActions, ManagedRecord, RecordService};
pub use site::SiteService;
pub use stats::StatsService;
