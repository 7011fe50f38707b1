//! Notice service

use chrono::Utc;
use society_core::{AdminUser, Notice};
use tracing::instrument;
use validator::Validate;

use crate::dto::CreateNoticeRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::records::RecordService;

/// Notice service
pub struct NoticeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NoticeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Shared list / update / archive / restore operations
    pub fn records(&self) -> RecordService<'a, Notice> {
        RecordService::new(self.ctx)
    }

    /// Create a notice (draft unless a status is given)
    #[instrument(skip(self, actor, request), fields(actor = %actor.email))]
    pub async fn create(
        &self,
        actor: &AdminUser,
        request: CreateNoticeRequest,
    ) -> ServiceResult<Notice> {
        request.validate()?;
        let notice = Notice::create(request.into(), &actor.email, Utc::now())?;
        self.records().insert(actor, notice).await
    }
}
