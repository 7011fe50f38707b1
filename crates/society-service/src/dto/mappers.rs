//! Request DTO to domain mappers
//!
//! Implements `From` conversions from request DTOs to the domain's creation
//! inputs and repository filters.

use society_core::{AuditFilter, ListFilter, NewCommitteeMember, NewGalleryAlbum, NewNotice};

use super::requests::{
    AuditQuery, CreateAlbumRequest, CreateCommitteeMemberRequest, CreateNoticeRequest, ListQuery,
    PublicListQuery,
};

// ============================================================================
// Filters
// ============================================================================

impl From<ListQuery> for ListFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            status: query.status,
            category: query.category,
            search: query.search,
        }
    }
}

impl From<PublicListQuery> for ListFilter {
    fn from(query: PublicListQuery) -> Self {
        Self {
            status: None,
            category: query.category,
            search: query.search,
        }
    }
}

impl From<AuditQuery> for AuditFilter {
    fn from(query: AuditQuery) -> Self {
        Self {
            user: query.user,
            action: query.action,
            entity: query.entity,
            start_date: query.start_date,
            end_date: query.end_date,
            limit: query.limit,
        }
    }
}

// ============================================================================
// Creation Inputs
// ============================================================================

impl From<CreateNoticeRequest> for NewNotice {
    fn from(req: CreateNoticeRequest) -> Self {
        Self {
            title: req.title,
            category: req.category,
            content: req.content,
            priority: req.priority,
            status: req.status,
            date: req.date,
        }
    }
}

impl From<CreateAlbumRequest> for NewGalleryAlbum {
    fn from(req: CreateAlbumRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            date: req.date,
        }
    }
}

impl From<CreateCommitteeMemberRequest> for NewCommitteeMember {
    fn from(req: CreateCommitteeMemberRequest) -> Self {
        Self {
            name: req.name,
            designation: req.designation,
            email: req.email,
            phone: req.phone,
            term_start: req.term_start,
            term_end: req.term_end,
            display_order: req.display_order,
        }
    }
}
