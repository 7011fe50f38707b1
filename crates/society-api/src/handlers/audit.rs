//! Audit log handlers (admin role)

use axum::{extract::State, Json};
use society_core::AuditLogEntry;
use society_service::dto::{AuditQuery, RecentQuery};
use society_service::AuditService;

use crate::extractors::{Admin, QueryParams};
use crate::response::{ApiResult, CsvAttachment};
use crate::state::AppState;

/// GET /admin/audit?user=&action=&entity=&startDate=&endDate=&limit=
pub async fn query_audit_log(
    State(state): State<AppState>,
    _admin: Admin,
    QueryParams(query): QueryParams<AuditQuery>,
) -> ApiResult<Json<Vec<AuditLogEntry>>> {
    let entries = AuditService::new(state.service_context())
        .query(query)
        .await?;
    Ok(Json(entries))
}

/// GET /admin/audit/recent?limit=
pub async fn recent_activity(
    State(state): State<AppState>,
    _admin: Admin,
    QueryParams(query): QueryParams<RecentQuery>,
) -> ApiResult<Json<Vec<AuditLogEntry>>> {
    let entries = AuditService::new(state.service_context())
        .recent(query.limit)
        .await?;
    Ok(Json(entries))
}

/// GET /admin/audit/export (text/csv attachment)
pub async fn export_audit_log(
    State(state): State<AppState>,
    admin: Admin,
    QueryParams(query): QueryParams<AuditQuery>,
) -> ApiResult<CsvAttachment> {
    let export = AuditService::new(state.service_context())
        .export_csv(query)
        .await?;
    tracing::info!(actor = %admin.user.email, rows = export.row_count, "Audit log exported");
    Ok(CsvAttachment(export))
}
