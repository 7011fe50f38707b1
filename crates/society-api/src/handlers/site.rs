//! Contact info and site settings (admin role)

use axum::{extract::State, Json};
use society_core::{ContactInfo, Settings};
use society_service::SiteService;

use crate::extractors::{Admin, JsonPatch};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /admin/contact
pub async fn get_contact(State(state): State<AppState>, _admin: Admin) -> ApiResult<Json<ContactInfo>> {
    Ok(Json(SiteService::new(state.service_context()).contact().await?))
}

/// PUT /admin/contact
pub async fn update_contact(
    State(state): State<AppState>,
    admin: Admin,
    JsonPatch(patch): JsonPatch,
) -> ApiResult<Json<ContactInfo>> {
    let contact = SiteService::new(state.service_context())
        .update_contact(&admin.user, patch)
        .await?;
    Ok(Json(contact))
}

/// GET /admin/settings
pub async fn get_settings(State(state): State<AppState>, _admin: Admin) -> ApiResult<Json<Settings>> {
    Ok(Json(SiteService::new(state.service_context()).settings().await?))
}

/// PUT /admin/settings
pub async fn update_settings(
    State(state): State<AppState>,
    admin: Admin,
    JsonPatch(patch): JsonPatch,
) -> ApiResult<Json<Settings>> {
    let settings = SiteService::new(state.service_context())
        .update_settings(&admin.user, patch)
        .await?;
    Ok(Json(settings))
}
