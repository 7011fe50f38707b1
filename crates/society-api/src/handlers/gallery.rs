//! Gallery handlers
//!
//! Albums are created from JSON; photos are uploaded as multipart `photos` parts.

use axum::{
    extract::{Path, State},
    Json,
};
use society_core::GalleryAlbum;
use society_service::dto::{CreateAlbumRequest, ReorderPhotosRequest, SetCoverRequest};
use society_service::GalleryService;

use crate::extractors::{Editor, UploadForm, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /admin/gallery
pub async fn create_album(
    State(state): State<AppState>,
    editor: Editor,
    ValidatedJson(request): ValidatedJson<CreateAlbumRequest>,
) -> ApiResult<Created<Json<GalleryAlbum>>> {
    let album = GalleryService::new(state.service_context())
        .create(&editor.user, request)
        .await?;
    Ok(Created(Json(album)))
}

/// POST /admin/gallery/:id/photos (multipart)
pub async fn upload_photos(
    State(state): State<AppState>,
    editor: Editor,
    Path(id): Path<String>,
    mut form: UploadForm,
) -> ApiResult<Json<GalleryAlbum>> {
    let photos = form.take_files("photos");
    let album = GalleryService::new(state.service_context())
        .upload_photos(&editor.user, &id, photos)
        .await?;
    Ok(Json(album))
}

/// DELETE /admin/gallery/:id/photos/:photo_id
pub async fn delete_photo(
    State(state): State<AppState>,
    editor: Editor,
    Path((id, photo_id)): Path<(String, String)>,
) -> ApiResult<Json<GalleryAlbum>> {
    let album = GalleryService::new(state.service_context())
        .delete_photo(&editor.user, &id, &photo_id)
        .await?;
    Ok(Json(album))
}

/// PUT /admin/gallery/:id/photos/order
pub async fn reorder_photos(
    State(state): State<AppState>,
    editor: Editor,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ReorderPhotosRequest>,
) -> ApiResult<Json<GalleryAlbum>> {
    let album = GalleryService::new(state.service_context())
        .reorder_photos(&editor.user, &id, request)
        .await?;
    Ok(Json(album))
}

/// PUT /admin/gallery/:id/cover
pub async fn set_cover(
    State(state): State<AppState>,
    editor: Editor,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<SetCoverRequest>,
) -> ApiResult<Json<GalleryAlbum>> {
    let album = GalleryService::new(state.service_context())
        .set_cover(&editor.user, &id, request)
        .await?;
    Ok(Json(album))
}
