//! Response DTOs for API endpoints
//!
//! Admin endpoints return records and singletons in their stored JSON shape;
//! the types here cover public records, auth, dashboard, export and health
//! responses.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use society_core::{AdminUser, AuditLogEntry};

// ============================================================================
// Public Responses
// ============================================================================

/// A record as shown to anonymous visitors, without admin bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PublicRecord(Map<String, Value>);

impl PublicRecord {
    /// Fields that name admins or describe the archive history
    pub const HIDDEN_FIELDS: [&'static str; 3] = ["createdBy", "updatedBy", "archivedAt"];

    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, serde_json::Error> {
        let mut fields = match serde_json::to_value(record)? {
            Value::Object(fields) => fields,
            other => {
                let mut fields = Map::new();
                fields.insert("value".to_string(), other);
                fields
            }
        };
        for field in Self::HIDDEN_FIELDS {
            fields.remove(field);
        }
        Ok(Self(fields))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Successful login; the session token travels in the cookie only
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: AdminUser,
}

impl LoginResponse {
    pub fn new(user: AdminUser) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

impl LogoutResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: "Logged out".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<AdminUser>,
}

impl SessionResponse {
    pub fn from_user(user: Option<AdminUser>) -> Self {
        Self {
            authenticated: user.is_some(),
            user,
        }
    }
}

/// Result of a login, handed to the API layer to set the cookie
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: AdminUser,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

/// Record counts for one collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    /// Publicly visible records
    pub active: usize,
    pub archived: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub notices: CollectionStats,
    pub documents: CollectionStats,
    pub events: CollectionStats,
    pub gallery: CollectionStats,
    pub committee: CollectionStats,
    pub upcoming_events: usize,
    pub recent_activity: Vec<AuditLogEntry>,
}

// ============================================================================
// Export Responses
// ============================================================================

/// A rendered CSV download
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub row_count: usize,
    pub content: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
    pub sessions: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool, sessions_healthy: bool) -> Self {
        let all_healthy = storage_healthy && sessions_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
                sessions: if sessions_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
