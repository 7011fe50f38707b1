//! Event service

use chrono::Utc;
use serde_json::{Map, Value};
use society_core::{AdminUser, AuditAction, EntityKind, Event, IncomingFile, NewEvent};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{parse_optional_date, EventForm};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::records::RecordService;

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn records(&self) -> RecordService<'a, Event> {
        RecordService::new(self.ctx)
    }

    /// Create an event with an optional image
    #[instrument(skip(self, actor, form, image), fields(actor = %actor.email))]
    pub async fn create(
        &self,
        actor: &AdminUser,
        form: EventForm,
        image: Option<IncomingFile>,
    ) -> ServiceResult<Event> {
        form.validate()?;
        let featured = form.is_featured();
        let date = parse_optional_date("date", form.date.as_deref())?;
        let mut event = Event::create(
            NewEvent {
                title: form.title,
                category: form.category,
                date,
                time: form.time,
                location: form.location,
                description: form.description,
                featured,
            },
            &actor.email,
            Utc::now(),
        )?;

        if let Some(image) = &image {
            self.ctx.image_policy().check(image)?;
        }

        // Events always reserve their id so one with an image cannot clash
        let records = self.records();
        event.id = records.reserve_id().await?;
        let Some(image) = image else {
            return records.insert_reserved(actor, event).await;
        };

        let stored = match self
            .ctx
            .uploads()
            .save(EntityKind::Event, &event.id, &image)
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                records.release_id(&event.id).await;
                return Err(e.into());
            }
        };
        event.image_path = Some(stored.path.clone());

        match records.insert_reserved(actor, event).await {
            Ok(created) => Ok(created),
            Err(e) => {
                if let Err(cleanup) = self.ctx.uploads().delete(&stored.path).await {
                    warn!(error = %cleanup, path = %stored.path, "Failed to remove orphaned upload");
                }
                Err(e)
            }
        }
    }

    /// Replace the image of an existing event; the previous file is deleted
    #[instrument(skip(self, actor, image), fields(actor = %actor.email))]
    pub async fn replace_image(
        &self,
        actor: &AdminUser,
        id: &str,
        image: IncomingFile,
    ) -> ServiceResult<Event> {
        self.ctx.image_policy().check(&image)?;
        let mut event = self.records().get(id).await?;

        let stored = self
            .ctx
            .uploads()
            .save(EntityKind::Event, &event.id, &image)
            .await?;
        let previous = event.image_path.replace(stored.path.clone());
        let updated = match self.records().replace(event).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Err(cleanup) = self.ctx.uploads().delete(&stored.path).await {
                    warn!(error = %cleanup, path = %stored.path, "Failed to remove orphaned upload");
                }
                return Err(e);
            }
        };
        info!(path = %stored.path, "Event image replaced");

        if let Some(previous) = previous {
            if let Err(e) = self.ctx.uploads().delete(&previous).await {
                warn!(error = %e, path = %previous, "Failed to delete previous event image");
            }
        }

        let mut details = Map::new();
        details.insert(
            "fields".to_string(),
            Value::Array(vec![Value::String("imagePath".to_string())]),
        );
        self.records()
            .audit(actor, AuditAction::EventUpdate, &updated, details)
            .await;
        Ok(updated)
    }
}
