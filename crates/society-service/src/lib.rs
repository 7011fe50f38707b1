//! # society-service
//!
//! Application layer containing the content services, admin auth, audit
//! trail and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuditService, AuthService, CommitteeService, DocumentService, EventService, GalleryService,
    ManagedRecord, NoticeService, RecordService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SiteService, StatsService,
};
