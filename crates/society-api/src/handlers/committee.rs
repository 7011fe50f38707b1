//! Committee member handlers

use axum::{extract::State, Json};
use society_core::CommitteeMember;
use society_service::dto::CreateCommitteeMemberRequest;
use society_service::CommitteeService;

use crate::extractors::{Editor, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /admin/committee
pub async fn create_member(
    State(state): State<AppState>,
    editor: Editor,
    ValidatedJson(request): ValidatedJson<CreateCommitteeMemberRequest>,
) -> ApiResult<Created<Json<CommitteeMember>>> {
    let member = CommitteeService::new(state.service_context())
        .create(&editor.user, request)
        .await?;
    Ok(Created(Json(member)))
}
