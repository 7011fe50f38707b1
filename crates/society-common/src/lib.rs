//! # society-common
//!
//! Shared utilities including configuration, error handling, admin credentials, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_session_token, hash_password, is_well_formed_token, verify_password, AdminAccount,
    AdminDirectory,
};
pub use config::{
    AppConfig, AppSettings, AuditConfig, ConfigError, CorsConfig, Environment, RateLimitConfig,
    RedisConfig, ServerConfig, SessionBackend, SessionConfig, StorageConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
