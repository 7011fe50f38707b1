//! Document handlers
//!
//! Documents are created from a multipart form: text fields plus one `file` part.

use axum::{extract::State, Json};
use society_core::Document;
use society_service::dto::DocumentForm;
use society_service::DocumentService;

use crate::extractors::{Editor, UploadForm};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /admin/documents (multipart)
pub async fn create_document(
    State(state): State<AppState>,
    editor: Editor,
    mut form: UploadForm,
) -> ApiResult<Created<Json<Document>>> {
    let file = form.take_file("file");
    let fields = DocumentForm {
        title: form.text_or_default("title"),
        category: form.text_or_default("category"),
        description: form.text("description"),
        date: form.text("date"),
    };

    let document = DocumentService::new(state.service_context())
        .create(&editor.user, fields, file)
        .await?;
    Ok(Created(Json(document)))
}
