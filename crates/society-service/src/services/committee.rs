//! Committee member service

use chrono::Utc;
use society_core::{AdminUser, CommitteeMember};
use tracing::instrument;
use validator::Validate;

use crate::dto::CreateCommitteeMemberRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::records::RecordService;

/// Committee member service
pub struct CommitteeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommitteeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn records(&self) -> RecordService<'a, CommitteeMember> {
        RecordService::new(self.ctx)
    }

    /// Add a member; without a display order the member goes to the end
    #[instrument(skip(self, actor, request), fields(actor = %actor.email))]
    pub async fn create(
        &self,
        actor: &AdminUser,
        request: CreateCommitteeMemberRequest,
    ) -> ServiceResult<CommitteeMember> {
        request.validate()?;
        let member = CommitteeMember::create(request.into(), &actor.email, Utc::now())?;
        self.records().insert(actor, member).await
    }
}
