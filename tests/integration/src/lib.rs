//! Integration test utilities for the society CMS
//!
//! Spawns the full router on an ephemeral port over a throwaway data
//! directory and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
