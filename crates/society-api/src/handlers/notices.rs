//! Notice handlers

use axum::{extract::State, Json};
use society_core::Notice;
use society_service::dto::CreateNoticeRequest;
use society_service::NoticeService;

use crate::extractors::{Editor, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /admin/notices
pub async fn create_notice(
    State(state): State<AppState>,
    editor: Editor,
    ValidatedJson(request): ValidatedJson<CreateNoticeRequest>,
) -> ApiResult<Created<Json<Notice>>> {
    let notice = NoticeService::new(state.service_context())
        .create(&editor.user, request)
        .await?;
    Ok(Created(Json(notice)))
}
