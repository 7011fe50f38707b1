//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use society_service::dto::{HealthResponse, ReadinessResponse};
use tracing::warn;

use crate::state::AppState;

const PROBE_FILE: &str = ".ready-probe";

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check: the data directory must be writable and the session
/// store reachable
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let probe = state.config().storage.data_dir.join(PROBE_FILE);
    let storage_healthy = match tokio::fs::write(&probe, b"ok").await {
        Ok(()) => {
            let _ = tokio::fs::remove_file(&probe).await;
            true
        }
        Err(e) => {
            warn!(error = %e, path = %probe.display(), "Data directory is not writable");
            false
        }
    };

    let sessions_healthy = match state.service_context().sessions().purge_expired().await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Session store unavailable");
            false
        }
    };

    let response = ReadinessResponse::ready(storage_healthy, sessions_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
