//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AuditConfig, ConfigError, CorsConfig, Environment, RateLimitConfig,
    RedisConfig, ServerConfig, SessionBackend, SessionConfig, StorageConfig,
};
