//! Gallery service
//!
//! Albums plus their photos. Photo binaries go through the upload store;
//! the album record keeps the photo list and cover path.

use chrono::Utc;
use serde_json::{Map, Value};
use society_core::{
    AdminUser, AuditAction, EntityKind, GalleryAlbum, IncomingFile, Photo, StoredFile,
};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{CreateAlbumRequest, ReorderPhotosRequest, SetCoverRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::records::RecordService;

/// Gallery service
pub struct GalleryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GalleryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn records(&self) -> RecordService<'a, GalleryAlbum> {
        RecordService::new(self.ctx)
    }

    /// Create an empty album
    #[instrument(skip(self, actor, request), fields(actor = %actor.email))]
    pub async fn create(
        &self,
        actor: &AdminUser,
        request: CreateAlbumRequest,
    ) -> ServiceResult<GalleryAlbum> {
        request.validate()?;
        let album = GalleryAlbum::create(request.into(), &actor.email, Utc::now())?;
        self.records().insert(actor, album).await
    }

    /// Add photos to an album. Every file is checked before any is stored.
    #[instrument(skip(self, actor, files), fields(actor = %actor.email, count = files.len()))]
    pub async fn upload_photos(
        &self,
        actor: &AdminUser,
        id: &str,
        files: Vec<IncomingFile>,
    ) -> ServiceResult<GalleryAlbum> {
        if files.is_empty() {
            return Err(ServiceError::validation("At least one photo is required"));
        }
        let policy = self.ctx.image_policy();
        for file in &files {
            policy.check(file)?;
        }

        let mut album = self.records().get(id).await?;
        let mut stored: Vec<StoredFile> = Vec::with_capacity(files.len());
        let now = Utc::now();

        for file in &files {
            match self
                .ctx
                .uploads()
                .save(EntityKind::GalleryAlbum, &album.id, file)
                .await
            {
                Ok(saved) => {
                    album.add_photo(Photo::new(&saved, &file.file_name, now));
                    stored.push(saved);
                }
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e.into());
                }
            }
        }

        let updated = match self.records().replace(album).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard(&stored).await;
                return Err(e);
            }
        };
        info!(id, count = stored.len(), "Photos uploaded");

        let mut details = Map::new();
        details.insert("count".to_string(), Value::from(stored.len()));
        self.records()
            .audit(actor, AuditAction::GalleryPhotoUpload, &updated, details)
            .await;
        Ok(updated)
    }

    /// Remove a photo and physically delete its file
    #[instrument(skip(self, actor), fields(actor = %actor.email))]
    pub async fn delete_photo(
        &self,
        actor: &AdminUser,
        id: &str,
        photo_id: &str,
    ) -> ServiceResult<GalleryAlbum> {
        let mut album = self.records().get(id).await?;
        let removed = album.remove_photo(photo_id)?;
        let updated = self.records().replace(album).await?;

        if let Err(e) = self.ctx.uploads().delete(&removed.path).await {
            warn!(error = %e, path = %removed.path, "Failed to delete photo file");
        }
        info!(id, photo_id, "Photo deleted");

        let mut details = Map::new();
        details.insert("photoId".to_string(), Value::String(removed.id));
        details.insert("filename".to_string(), Value::String(removed.filename));
        self.records()
            .audit(actor, AuditAction::GalleryPhotoDelete, &updated, details)
            .await;
        Ok(updated)
    }

    #[instrument(skip(self, actor, request), fields(actor = %actor.email))]
    pub async fn reorder_photos(
        &self,
        actor: &AdminUser,
        id: &str,
        request: ReorderPhotosRequest,
    ) -> ServiceResult<GalleryAlbum> {
        let mut album = self.records().get(id).await?;
        album.reorder_photos(&request.photo_ids)?;
        let updated = self.records().replace(album).await?;

        self.records()
            .audit(actor, AuditAction::GalleryPhotoReorder, &updated, Map::new())
            .await;
        Ok(updated)
    }

    #[instrument(skip(self, actor, request), fields(actor = %actor.email))]
    pub async fn set_cover(
        &self,
        actor: &AdminUser,
        id: &str,
        request: SetCoverRequest,
    ) -> ServiceResult<GalleryAlbum> {
        let mut album = self.records().get(id).await?;
        album.set_cover(&request.photo_id)?;
        let updated = self.records().replace(album).await?;

        let mut details = Map::new();
        details.insert("photoId".to_string(), Value::String(request.photo_id));
        self.records()
            .audit(actor, AuditAction::GalleryCoverSet, &updated, details)
            .await;
        Ok(updated)
    }

    async fn discard(&self, stored: &[StoredFile]) {
        for file in stored {
            if let Err(e) = self.ctx.uploads().delete(&file.path).await {
                warn!(error = %e, path = %file.path, "Failed to remove orphaned upload");
            }
        }
    }
}
