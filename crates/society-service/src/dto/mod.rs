//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers from request DTOs into domain inputs and filters

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    parse_optional_date, AuditQuery, CreateAlbumRequest, CreateCommitteeMemberRequest,
    CreateNoticeRequest, DocumentForm, EventForm, ListQuery, LoginRequest, PublicListQuery,
    RecentQuery, ReorderPhotosRequest, SetCoverRequest,
};

pub use responses::{
    CollectionStats, CsvExport, DashboardStats, HealthChecks, HealthResponse, LoginOutcome,
    LoginResponse, LogoutResponse, PublicRecord, ReadinessResponse, SessionResponse,
};
