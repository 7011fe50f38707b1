//! Axum extractors for request handling
//!
//! Custom extractors for sessions and roles, validated bodies, query strings
//! and multipart uploads.

mod auth;
mod multipart;
mod query;
mod validated;

pub use auth::{
    Admin, AdminRole, Authenticated, Editor, EditorRole, RoleRequirement, SessionToken, Viewer,
    ViewerRole,
};
pub use multipart::UploadForm;
pub use query::QueryParams;
pub use validated::{JsonPatch, ValidatedJson};
