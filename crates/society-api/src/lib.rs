//! # society-api
//!
//! REST API server built with Axum: admin and public endpoints under `/api/v1`,
//! health probes, and static serving of uploaded files.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
