//! Service context - dependency container for services
//!
//! Holds the record collections, singleton documents, audit log, upload
//! store, session store and credential directory used by services.

use std::sync::Arc;

use society_cache::SessionStore;
use society_common::AdminDirectory;
use society_core::traits::{
    AuditLogRepository, CollectionRepository, SingletonRepository, UploadStore,
};
use society_core::{
    CommitteeMember, ContactInfo, Document, Event, GalleryAlbum, Notice, Settings, UploadPolicy,
};

use super::error::{ServiceError, ServiceResult};

const DEFAULT_MAX_DOCUMENT_MB: u64 = 10;
const DEFAULT_MAX_IMAGE_MB: u64 = 5;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Storage sits behind the repository ports from `society-core`, sessions
/// behind `SessionStore`, so tests can swap either.
#[derive(Clone)]
pub struct ServiceContext {
    // Record collections
    notices: Arc<dyn CollectionRepository<Notice>>,
    documents: Arc<dyn CollectionRepository<Document>>,
    events: Arc<dyn CollectionRepository<Event>>,
    gallery: Arc<dyn CollectionRepository<GalleryAlbum>>,
    committee: Arc<dyn CollectionRepository<CommitteeMember>>,

    // Singletons
    contact: Arc<dyn SingletonRepository<ContactInfo>>,
    settings: Arc<dyn SingletonRepository<Settings>>,

    audit_log: Arc<dyn AuditLogRepository>,
    uploads: Arc<dyn UploadStore>,

    // Auth
    sessions: Arc<dyn SessionStore>,
    directory: Arc<AdminDirectory>,

    document_policy: UploadPolicy,
    image_policy: UploadPolicy,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Collections ===

    pub fn notices(&self) -> &dyn CollectionRepository<Notice> {
        self.notices.as_ref()
    }

    pub fn documents(&self) -> &dyn CollectionRepository<Document> {
        self.documents.as_ref()
    }

    pub fn events(&self) -> &dyn CollectionRepository<Event> {
        self.events.as_ref()
    }

    pub fn gallery(&self) -> &dyn CollectionRepository<GalleryAlbum> {
        self.gallery.as_ref()
    }

    pub fn committee(&self) -> &dyn CollectionRepository<CommitteeMember> {
        self.committee.as_ref()
    }

    // === Singletons ===

    pub fn contact(&self) -> &dyn SingletonRepository<ContactInfo> {
        self.contact.as_ref()
    }

    pub fn settings(&self) -> &dyn SingletonRepository<Settings> {
        self.settings.as_ref()
    }

    // === Audit & uploads ===

    pub fn audit_log(&self) -> &dyn AuditLogRepository {
        self.audit_log.as_ref()
    }

    pub fn uploads(&self) -> &dyn UploadStore {
        self.uploads.as_ref()
    }

    // === Auth ===

    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    pub fn directory(&self) -> &AdminDirectory {
        self.directory.as_ref()
    }

    // === Upload policies ===

    /// PDF policy for documents
    pub fn document_policy(&self) -> UploadPolicy {
        self.document_policy
    }

    /// Image policy for event images and gallery photos
    pub fn image_policy(&self) -> UploadPolicy {
        self.image_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("collections", &"...")
            .field("sessions", &"dyn SessionStore")
            .field("accounts", &self.directory.len())
            .field("document_policy", &self.document_policy)
            .field("image_policy", &self.image_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    notices: Option<Arc<dyn CollectionRepository<Notice>>>,
    documents: Option<Arc<dyn CollectionRepository<Document>>>,
    events: Option<Arc<dyn CollectionRepository<Event>>>,
    gallery: Option<Arc<dyn CollectionRepository<GalleryAlbum>>>,
    committee: Option<Arc<dyn CollectionRepository<CommitteeMember>>>,
    contact: Option<Arc<dyn SingletonRepository<ContactInfo>>>,
    settings: Option<Arc<dyn SingletonRepository<Settings>>>,
    audit_log: Option<Arc<dyn AuditLogRepository>>,
    uploads: Option<Arc<dyn UploadStore>>,
    sessions: Option<Arc<dyn SessionStore>>,
    directory: Option<Arc<AdminDirectory>>,
    document_policy: UploadPolicy,
    image_policy: UploadPolicy,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            notices: None,
            documents: None,
            events: None,
            gallery: None,
            committee: None,
            contact: None,
            settings: None,
            audit_log: None,
            uploads: None,
            sessions: None,
            directory: None,
            document_policy: UploadPolicy::document(DEFAULT_MAX_DOCUMENT_MB),
            image_policy: UploadPolicy::image(DEFAULT_MAX_IMAGE_MB),
        }
    }

    pub fn notices(mut self, repo: Arc<dyn CollectionRepository<Notice>>) -> Self {
        self.notices = Some(repo);
        self
    }

    pub fn documents(mut self, repo: Arc<dyn CollectionRepository<Document>>) -> Self {
        self.documents = Some(repo);
        self
    }

    pub fn events(mut self, repo: Arc<dyn CollectionRepository<Event>>) -> Self {
        self.events = Some(repo);
        self
    }

    pub fn gallery(mut self, repo: Arc<dyn CollectionRepository<GalleryAlbum>>) -> Self {
        self.gallery = Some(repo);
        self
    }

    pub fn committee(mut self, repo: Arc<dyn CollectionRepository<CommitteeMember>>) -> Self {
        self.committee = Some(repo);
        self
    }

    pub fn contact(mut self, repo: Arc<dyn SingletonRepository<ContactInfo>>) -> Self {
        self.contact = Some(repo);
        self
    }

    pub fn settings(mut self, repo: Arc<dyn SingletonRepository<Settings>>) -> Self {
        self.settings = Some(repo);
        self
    }

    pub fn audit_log(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_log = Some(repo);
        self
    }

    pub fn uploads(mut self, store: Arc<dyn UploadStore>) -> Self {
        self.uploads = Some(store);
        self
    }

    pub fn sessions(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.sessions = Some(store);
        self
    }

    pub fn directory(mut self, directory: Arc<AdminDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Upload size limits in MiB
    pub fn upload_limits(mut self, max_document_mb: u64, max_image_mb: u64) -> Self {
        self.document_policy = UploadPolicy::document(max_document_mb);
        self.image_policy = UploadPolicy::image(max_image_mb);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            notices: required(self.notices, "notices")?,
            documents: required(self.documents, "documents")?,
            events: required(self.events, "events")?,
            gallery: required(self.gallery, "gallery")?,
            committee: required(self.committee, "committee")?,
            contact: required(self.contact, "contact")?,
            settings: required(self.settings, "settings")?,
            audit_log: required(self.audit_log, "audit_log")?,
            uploads: required(self.uploads, "uploads")?,
            sessions: required(self.sessions, "sessions")?,
            directory: required(self.directory, "directory")?,
            document_policy: self.document_policy,
            image_policy: self.image_policy,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
