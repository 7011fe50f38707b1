//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use society_core::{CommitteeMember, Document, Event, GalleryAlbum, Notice};
use society_service::ManagedRecord;

use crate::handlers::{
    audit, auth, committee, documents, events, gallery, health, notices, public, records, site,
    stats,
};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(admin_collection_routes())
        .merge(gallery_photo_routes())
        .merge(admin_site_routes())
        .merge(public_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
}

/// List, get, create, update, archive and restore for every collection
fn admin_collection_routes() -> Router<AppState> {
    Router::new()
        .merge(collection::<Notice>("notices", post(notices::create_notice)))
        .merge(collection::<Document>("documents", post(documents::create_document)))
        .merge(collection::<Event>("events", post(events::create_event)))
        .merge(collection::<GalleryAlbum>("gallery", post(gallery::create_album)))
        .merge(collection::<CommitteeMember>("committee", post(committee::create_member)))
        .route("/admin/events/:id/image", put(events::replace_event_image))
}

fn collection<T: ManagedRecord>(name: &str, create: MethodRouter<AppState>) -> Router<AppState> {
    Router::new()
        .route(
            &format!("/admin/{name}"),
            get(records::list::<T>).merge(create),
        )
        .route(
            &format!("/admin/{name}/:id"),
            get(records::get::<T>)
                .put(records::update::<T>)
                .delete(records::archive::<T>),
        )
        .route(
            &format!("/admin/{name}/:id/restore"),
            post(records::restore::<T>),
        )
}

/// Photo management inside an album
fn gallery_photo_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/gallery/:id/photos", post(gallery::upload_photos))
        .route("/admin/gallery/:id/photos/order", put(gallery::reorder_photos))
        .route(
            "/admin/gallery/:id/photos/:photo_id",
            delete(gallery::delete_photo),
        )
        .route("/admin/gallery/:id/cover", put(gallery::set_cover))
}

/// Singletons, audit trail and dashboard
fn admin_site_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/contact", get(site::get_contact).put(site::update_contact))
        .route("/admin/settings", get(site::get_settings).put(site::update_settings))
        .route("/admin/audit", get(audit::query_audit_log))
        .route("/admin/audit/recent", get(audit::recent_activity))
        .route("/admin/audit/export", get(audit::export_audit_log))
        .route("/admin/stats", get(stats::dashboard))
}

/// Read-only public site
fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(public_collection::<Notice>("notices"))
        .merge(public_collection::<Document>("documents"))
        .merge(public_collection::<Event>("events"))
        .merge(public_collection::<GalleryAlbum>("gallery"))
        .merge(public_collection::<CommitteeMember>("committee"))
        .route("/public/contact", get(public::contact))
        .route("/public/settings", get(public::settings))
}

fn public_collection<T: ManagedRecord>(name: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("/public/{name}"), get(public::list::<T>))
        .route(&format!("/public/{name}/:id"), get(public::get::<T>))
}
