//! Operations shared by every record collection
//!
//! Listing, lookup, patch updates, archive and restore work the same way for
//! notices, documents, events, albums and committee members. The per-entity
//! services add creation and anything specific on top.

use serde_json::{Map, Value};
use society_core::traits::CollectionRepository;
use society_core::{
    AdminUser, AuditAction, AuditLogEntry, CommitteeMember, Document, DomainError, Event,
    Features, GalleryAlbum, Lifecycle, ListFilter, Notice, Record, RecordId,
};
use tracing::{info, instrument};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Audit actions emitted for the common lifecycle of one collection
#[derive(Debug, Clone, Copy)]
pub struct LifecycleActions {
    pub create: AuditAction,
    pub update: AuditAction,
    pub archive: AuditAction,
    pub restore: AuditAction,
}

/// A record type managed through the admin API
pub trait ManagedRecord: Record {
    const ACTIONS: LifecycleActions;

    /// Fields only the service may change (file references)
    const PROTECTED_FIELDS: &'static [&'static str] = &[];

    fn repo(ctx: &ServiceContext) -> &dyn CollectionRepository<Self>;

    /// Title or name shown in audit details
    fn display_name(&self) -> &str;

    /// Public section toggle; `None` for sections that cannot be hidden
    fn public_section(_features: &Features) -> Option<(bool, &'static str)> {
        None
    }
}

impl ManagedRecord for Notice {
    const ACTIONS: LifecycleActions = LifecycleActions {
        create: AuditAction::NoticeCreate,
        update: AuditAction::NoticeUpdate,
        archive: AuditAction::NoticeArchive,
        restore: AuditAction::NoticeRestore,
    };

    fn repo(ctx: &ServiceContext) -> &dyn CollectionRepository<Self> {
        ctx.notices()
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

impl ManagedRecord for Document {
    const ACTIONS: LifecycleActions = LifecycleActions {
        create: AuditAction::DocumentCreate,
        update: AuditAction::DocumentUpdate,
        archive: AuditAction::DocumentArchive,
        restore: AuditAction::DocumentRestore,
    };
    const PROTECTED_FIELDS: &'static [&'static str] = &Document::FILE_FIELDS;

    fn repo(ctx: &ServiceContext) -> &dyn CollectionRepository<Self> {
        ctx.documents()
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn public_section(features: &Features) -> Option<(bool, &'static str)> {
        Some((features.show_documents, "documents"))
    }
}

impl ManagedRecord for Event {
    const ACTIONS: LifecycleActions = LifecycleActions {
        create: AuditAction::EventCreate,
        update: AuditAction::EventUpdate,
        archive: AuditAction::EventArchive,
        restore: AuditAction::EventRestore,
    };
    const PROTECTED_FIELDS: &'static [&'static str] = &Event::FILE_FIELDS;

    fn repo(ctx: &ServiceContext) -> &dyn CollectionRepository<Self> {
        ctx.events()
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn public_section(features: &Features) -> Option<(bool, &'static str)> {
        Some((features.show_events, "events"))
    }
}

impl ManagedRecord for GalleryAlbum {
    const ACTIONS: LifecycleActions = LifecycleActions {
        create: AuditAction::GalleryCreate,
        update: AuditAction::GalleryUpdate,
        archive: AuditAction::GalleryArchive,
        restore: AuditAction::GalleryRestore,
    };
    const PROTECTED_FIELDS: &'static [&'static str] = &GalleryAlbum::PHOTO_FIELDS;

    fn repo(ctx: &ServiceContext) -> &dyn CollectionRepository<Self> {
        ctx.gallery()
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn public_section(features: &Features) -> Option<(bool, &'static str)> {
        Some((features.show_gallery, "gallery"))
    }
}

impl ManagedRecord for CommitteeMember {
    const ACTIONS: LifecycleActions = LifecycleActions {
        create: AuditAction::CommitteeCreate,
        update: AuditAction::CommitteeUpdate,
        archive: AuditAction::CommitteeArchive,
        restore: AuditAction::CommitteeRestore,
    };

    fn repo(ctx: &ServiceContext) -> &dyn CollectionRepository<Self> {
        ctx.committee()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn public_section(features: &Features) -> Option<(bool, &'static str)> {
        Some((features.show_committee, "committee"))
    }
}

/// Generic record service for one collection
pub struct RecordService<'a, T> {
    ctx: &'a ServiceContext,
    _record: std::marker::PhantomData<fn() -> T>,
}

impl<'a, T: ManagedRecord> RecordService<'a, T> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            _record: std::marker::PhantomData,
        }
    }

    fn repo(&self) -> &'a dyn CollectionRepository<T> {
        T::repo(self.ctx)
    }

    /// Admin listing; archived records are included unless filtered out
    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn list(&self, filter: &ListFilter) -> ServiceResult<Vec<T>> {
        if let Some(status) = filter.status.as_deref() {
            if T::Status::parse(status).is_none() {
                return Err(ServiceError::validation(format!(
                    "Unknown status '{status}' for {}",
                    T::KIND.collection()
                )));
            }
        }
        Ok(self.repo().list(filter).await?)
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn get(&self, id: &str) -> ServiceResult<T> {
        self.repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::KIND, id).into())
    }

    /// Append a freshly defaulted record and audit it
    #[instrument(skip(self, actor, record), fields(kind = %T::KIND, actor = %actor.email))]
    pub async fn insert(&self, actor: &AdminUser, record: T) -> ServiceResult<T> {
        let created = self.repo().create(record).await?;
        info!(id = %created.id(), "Record created");

        self.audit(actor, T::ACTIONS.create, &created, Map::new()).await;
        Ok(created)
    }

    /// Reserve the id of a record whose files are stored before it is inserted
    pub async fn reserve_id(&self) -> ServiceResult<RecordId> {
        Ok(self.repo().reserve_id().await?)
    }

    pub async fn release_id(&self, id: &RecordId) {
        self.repo().release_id(id).await;
    }

    /// Like `insert`, for a record carrying an id from `reserve_id`
    #[instrument(skip(self, actor, record), fields(kind = %T::KIND, actor = %actor.email, id = %record.id()))]
    pub async fn insert_reserved(&self, actor: &AdminUser, record: T) -> ServiceResult<T> {
        let created = self.repo().create_reserved(record).await?;
        info!("Record created");

        self.audit(actor, T::ACTIONS.create, &created, Map::new()).await;
        Ok(created)
    }

    /// Merge a JSON patch; file references and immutable fields are ignored
    #[instrument(skip(self, actor, patch), fields(kind = %T::KIND, actor = %actor.email))]
    pub async fn update(
        &self,
        actor: &AdminUser,
        id: &str,
        mut patch: Map<String, Value>,
    ) -> ServiceResult<T> {
        for field in T::PROTECTED_FIELDS {
            patch.remove(*field);
        }

        let updated = self.repo().update(id, &patch).await?;
        info!(id, "Record updated");

        let fields: Vec<Value> = patch.keys().cloned().map(Value::String).collect();
        let mut details = Map::new();
        details.insert("fields".to_string(), Value::Array(fields));
        self.audit(actor, T::ACTIONS.update, &updated, details).await;
        Ok(updated)
    }

    /// Replace a record the service has modified itself
    pub async fn replace(&self, record: T) -> ServiceResult<T> {
        Ok(self.repo().replace(record).await?)
    }

    #[instrument(skip(self, actor), fields(kind = %T::KIND, actor = %actor.email))]
    pub async fn archive(&self, actor: &AdminUser, id: &str) -> ServiceResult<T> {
        let archived = self.repo().archive(id).await?;
        info!(id, "Record archived");

        self.audit(actor, T::ACTIONS.archive, &archived, Map::new()).await;
        Ok(archived)
    }

    #[instrument(skip(self, actor), fields(kind = %T::KIND, actor = %actor.email))]
    pub async fn restore(&self, actor: &AdminUser, id: &str) -> ServiceResult<T> {
        let restored = self.repo().restore(id).await?;
        info!(id, status = %restored.status(), "Record restored");

        self.audit(actor, T::ACTIONS.restore, &restored, Map::new()).await;
        Ok(restored)
    }

    /// Publicly visible records only, honouring the section toggle
    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn list_public(&self, filter: ListFilter) -> ServiceResult<Vec<T>> {
        self.ensure_public_section().await?;
        let filter = filter.status(T::Status::PUBLIC.as_str());
        Ok(self.repo().list(&filter).await?)
    }

    /// A single record, hidden unless publicly visible
    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn get_public(&self, id: &str) -> ServiceResult<T> {
        self.ensure_public_section().await?;
        match self.repo().find_by_id(id).await? {
            Some(record) if record.status().is_public() => Ok(record),
            _ => Err(DomainError::not_found(T::KIND, id).into()),
        }
    }

    async fn ensure_public_section(&self) -> ServiceResult<()> {
        let settings = self.ctx.settings().get().await?;
        match T::public_section(&settings.features) {
            Some((false, section)) => Err(ServiceError::FeatureDisabled(section)),
            _ => Ok(()),
        }
    }

    pub(crate) async fn audit(
        &self,
        actor: &AdminUser,
        action: AuditAction,
        record: &T,
        mut details: Map<String, Value>,
    ) {
        details.insert(
            "title".to_string(),
            Value::String(record.display_name().to_string()),
        );
        let entry = AuditLogEntry::new(actor, action, Some(record.id().to_string()))
            .with_details(details);
        AuditService::new(self.ctx).record(entry).await;
    }
}
