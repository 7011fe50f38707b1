//! Dashboard handler

use axum::{extract::State, Json};
use society_service::dto::DashboardStats;
use society_service::StatsService;

use crate::extractors::Viewer;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /admin/stats
pub async fn dashboard(State(state): State<AppState>, _viewer: Viewer) -> ApiResult<Json<DashboardStats>> {
    let stats = StatsService::new(state.service_context()).dashboard().await?;
    Ok(Json(stats))
}
