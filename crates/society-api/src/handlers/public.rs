//! Public read-only handlers
//!
//! No session required. Drafts and archived records are never returned, and a
//! section switched off in the settings answers 404.

use axum::{
    extract::{Path, State},
    Json,
};
use society_core::{ContactInfo, PublicSettings};
use society_service::dto::{PublicListQuery, PublicRecord};
use society_service::{ManagedRecord, RecordService, SiteService};

use crate::extractors::QueryParams;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /public/<collection>?category=&search=
pub async fn list<T: ManagedRecord>(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PublicListQuery>,
) -> ApiResult<Json<Vec<PublicRecord>>> {
    let records = RecordService::<T>::new(state.service_context())
        .list_public(query.into())
        .await?;
    let records = records
        .iter()
        .map(PublicRecord::from_record)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(records))
}

/// GET /public/<collection>/:id
pub async fn get<T: ManagedRecord>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PublicRecord>> {
    let record = RecordService::<T>::new(state.service_context())
        .get_public(&id)
        .await?;
    let record = PublicRecord::from_record(&record).map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(record))
}

/// GET /public/contact
pub async fn contact(State(state): State<AppState>) -> ApiResult<Json<ContactInfo>> {
    Ok(Json(SiteService::new(state.service_context()).contact().await?))
}

/// GET /public/settings (society, branding and features only)
pub async fn settings(State(state): State<AppState>) -> ApiResult<Json<PublicSettings>> {
    Ok(Json(
        SiteService::new(state.service_context())
            .public_settings()
            .await?,
    ))
}
