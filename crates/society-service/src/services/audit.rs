//! Audit service
//!
//! Records admin actions and serves the audit log views and CSV export.

use std::fmt::Write as _;

use chrono::{NaiveDate, Utc};
use society_core::{AuditAction, AuditFilter, AuditLogEntry};
use tracing::{error, instrument};

use crate::dto::{AuditQuery, CsvExport};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Entries returned by the audit view when no limit is given
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Entries returned by the recent-activity view when no limit is given
pub const DEFAULT_RECENT_LIMIT: usize = 10;

const CSV_HEADER: [&str; 7] = [
    "Timestamp",
    "User",
    "Email",
    "Action",
    "Entity",
    "Entity ID",
    "Details",
];

/// Audit service
pub struct AuditService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditService<'a> {
    /// Create a new AuditService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append an entry. A failed write is logged and never fails the caller.
    pub async fn record(&self, entry: AuditLogEntry) {
        let action = entry.action.clone();
        if let Err(e) = self.ctx.audit_log().append(entry).await {
            error!(error = %e, %action, "Failed to write audit log entry");
        }
    }

    /// Filtered entries, newest first
    #[instrument(skip(self))]
    pub async fn query(&self, query: AuditQuery) -> ServiceResult<Vec<AuditLogEntry>> {
        let mut filter = AuditFilter::from(query);
        filter.limit.get_or_insert(DEFAULT_QUERY_LIMIT);
        Ok(self.ctx.audit_log().query(&filter).await?)
    }

    /// The newest entries
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: Option<usize>) -> ServiceResult<Vec<AuditLogEntry>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        Ok(self.ctx.audit_log().recent(limit).await?)
    }

    /// Filtered entries as a CSV download; unlimited unless a limit is given
    #[instrument(skip(self))]
    pub async fn export_csv(&self, query: AuditQuery) -> ServiceResult<CsvExport> {
        let filter = AuditFilter::from(query);
        let entries = self.ctx.audit_log().query(&filter).await?;

        Ok(CsvExport {
            filename: export_filename(Utc::now().date_naive()),
            row_count: entries.len(),
            content: render_csv(&entries),
        })
    }
}

/// `audit-log-<yyyy-mm-dd>.csv`
pub fn export_filename(day: NaiveDate) -> String {
    format!("audit-log-{}.csv", day.format("%Y-%m-%d"))
}

/// Render entries as CSV with every field quoted
pub fn render_csv(entries: &[AuditLogEntry]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER.iter().copied());

    for entry in entries {
        let timestamp = entry.timestamp.to_rfc3339();
        let details = serde_json::Value::Object(entry.details.clone()).to_string();
        push_row(
            &mut out,
            [
                timestamp.as_str(),
                entry.user.name.as_str(),
                entry.user.email.as_str(),
                AuditAction::label_for(&entry.action),
                entry.entity.as_str(),
                entry.entity_id.as_deref().unwrap_or(""),
                details.as_str(),
            ],
        );
    }
    out
}

fn push_row<'f>(out: &mut String, fields: impl IntoIterator<Item = &'f str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "\"{}\"", field.replace('"', "\"\""));
    }
    out.push('\n');
}
