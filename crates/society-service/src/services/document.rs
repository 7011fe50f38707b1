//! Document service
//!
//! Documents are created from a multipart upload: the form fields and the
//! PDF are validated before anything is written.

use chrono::Utc;
use society_core::{AdminUser, Document, EntityKind, IncomingFile, NewDocument};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{parse_optional_date, DocumentForm};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::records::RecordService;

/// Document service
pub struct DocumentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DocumentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn records(&self) -> RecordService<'a, Document> {
        RecordService::new(self.ctx)
    }

    /// Validate and store an uploaded PDF, then append its record
    #[instrument(skip(self, actor, form, file), fields(actor = %actor.email))]
    pub async fn create(
        &self,
        actor: &AdminUser,
        form: DocumentForm,
        file: Option<IncomingFile>,
    ) -> ServiceResult<Document> {
        form.validate()?;
        let date = parse_optional_date("date", form.date.as_deref())?;
        let mut document = Document::create(
            NewDocument {
                title: form.title,
                category: form.category,
                description: form.description,
                date,
            },
            &actor.email,
            Utc::now(),
        )?;

        let file = file.ok_or_else(|| ServiceError::validation("A PDF file is required"))?;
        self.ctx.document_policy().check(&file)?;

        // The file lives under the record's id, so the id is fixed first
        let records = self.records();
        document.id = records.reserve_id().await?;
        let stored = match self
            .ctx
            .uploads()
            .save(EntityKind::Document, &document.id, &file)
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                records.release_id(&document.id).await;
                return Err(e.into());
            }
        };
        document.attach_file(&stored, &file.file_name);
        info!(id = %document.id, path = %stored.path, size = stored.size, "Document file stored");

        match records.insert_reserved(actor, document).await {
            Ok(created) => Ok(created),
            Err(e) => {
                // No record, so the stored file would be orphaned
                if let Err(cleanup) = self.ctx.uploads().delete(&stored.path).await {
                    warn!(error = %cleanup, path = %stored.path, "Failed to remove orphaned upload");
                }
                Err(e)
            }
        }
    }
}
