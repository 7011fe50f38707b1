//! Dashboard statistics

use chrono::Utc;
use society_core::{
    CommitteeMember, Document, GalleryAlbum, Lifecycle, ListFilter, Notice, Record,
};
use tracing::instrument;

use crate::dto::{CollectionStats, DashboardStats};

use super::audit::{AuditService, DEFAULT_RECENT_LIMIT};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::records::ManagedRecord;

/// Stats service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Per-collection counts plus the latest admin activity
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> ServiceResult<DashboardStats> {
        let events = self.ctx.events().list(&ListFilter::default()).await?;
        let today = Utc::now().date_naive();
        let upcoming_events = events
            .iter()
            .filter(|e| e.status.is_public() && e.is_upcoming(today))
            .count();

        Ok(DashboardStats {
            notices: self.collection_stats::<Notice>().await?,
            documents: self.collection_stats::<Document>().await?,
            events: count(&events),
            gallery: self.collection_stats::<GalleryAlbum>().await?,
            committee: self.collection_stats::<CommitteeMember>().await?,
            upcoming_events,
            recent_activity: AuditService::new(self.ctx)
                .recent(Some(DEFAULT_RECENT_LIMIT))
                .await?,
        })
    }

    async fn collection_stats<T: ManagedRecord>(&self) -> ServiceResult<CollectionStats> {
        let records = T::repo(self.ctx).list(&ListFilter::default()).await?;
        Ok(count(&records))
    }
}

fn count<T: Record>(records: &[T]) -> CollectionStats {
    records
        .iter()
        .fold(CollectionStats::default(), |mut stats, record| {
            stats.total += 1;
            let status = record.status();
            if status.is_archived() {
                stats.archived += 1;
            } else if status.is_public() {
                stats.active += 1;
            }
            stats
        })
}
