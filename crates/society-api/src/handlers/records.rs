//! Admin handlers shared by every record collection
//!
//! Mounted once per collection with the record type as a parameter, e.g.
//! `get(records::list::<Notice>)`.

use axum::{
    extract::{Path, State},
    Json,
};
use society_service::dto::ListQuery;
use society_service::{ManagedRecord, RecordService};

use crate::extractors::{Editor, JsonPatch, QueryParams, Viewer};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /admin/<collection>?status=&category=&search=
pub async fn list<T: ManagedRecord>(
    State(state): State<AppState>,
    _viewer: Viewer,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Json<Vec<T>>> {
    let records = RecordService::<T>::new(state.service_context())
        .list(&query.into())
        .await?;
    Ok(Json(records))
}

/// GET /admin/<collection>/:id
pub async fn get<T: ManagedRecord>(
    State(state): State<AppState>,
    _viewer: Viewer,
    Path(id): Path<String>,
) -> ApiResult<Json<T>> {
    let record = RecordService::<T>::new(state.service_context())
        .get(&id)
        .await?;
    Ok(Json(record))
}

/// PUT /admin/<collection>/:id
pub async fn update<T: ManagedRecord>(
    State(state): State<AppState>,
    editor: Editor,
    Path(id): Path<String>,
    JsonPatch(patch): JsonPatch,
) -> ApiResult<Json<T>> {
    let record = RecordService::<T>::new(state.service_context())
        .update(&editor.user, &id, patch)
        .await?;
    Ok(Json(record))
}

/// DELETE /admin/<collection>/:id (soft delete)
pub async fn archive<T: ManagedRecord>(
    State(state): State<AppState>,
    editor: Editor,
    Path(id): Path<String>,
) -> ApiResult<Json<T>> {
    let record = RecordService::<T>::new(state.service_context())
        .archive(&editor.user, &id)
        .await?;
    Ok(Json(record))
}

/// POST /admin/<collection>/:id/restore
pub async fn restore<T: ManagedRecord>(
    State(state): State<AppState>,
    editor: Editor,
    Path(id): Path<String>,
) -> ApiResult<Json<T>> {
    let record = RecordService::<T>::new(state.service_context())
        .restore(&editor.user, &id)
        .await?;
    Ok(Json(record))
}
