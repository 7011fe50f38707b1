//! Event handlers
//!
//! Events are created from a multipart form with an optional `image` part.

use axum::{
    extract::{Path, State},
    Json,
};
use society_core::Event;
use society_service::dto::EventForm;
use society_service::{EventService, ServiceError};

use crate::extractors::{Editor, UploadForm};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /admin/events (multipart)
pub async fn create_event(
    State(state): State<AppState>,
    editor: Editor,
    mut form: UploadForm,
) -> ApiResult<Created<Json<Event>>> {
    let image = form.take_file("image");
    let fields = EventForm {
        title: form.text_or_default("title"),
        category: form.text_or_default("category"),
        date: form.text("date"),
        time: form.text("time"),
        location: form.text("location"),
        description: form.text("description"),
        featured: form.text("featured"),
    };

    let event = EventService::new(state.service_context())
        .create(&editor.user, fields, image)
        .await?;
    Ok(Created(Json(event)))
}

/// PUT /admin/events/:id/image (multipart, one `image` part)
pub async fn replace_event_image(
    State(state): State<AppState>,
    editor: Editor,
    Path(id): Path<String>,
    mut form: UploadForm,
) -> ApiResult<Json<Event>> {
    let image = form
        .take_file("image")
        .ok_or_else(|| ServiceError::validation("An image file is required"))?;

    let event = EventService::new(state.service_context())
        .replace_image(&editor.user, &id, image)
        .await?;
    Ok(Json(event))
}
