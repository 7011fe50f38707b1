//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod audit;
pub mod auth;
pub mod committee;
pub mod documents;
pub mod events;
pub mod gallery;
pub mod health;
pub mod notices;
pub mod public;
pub mod records;
pub mod site;
pub mod stats;
