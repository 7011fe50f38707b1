//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub redis: Option<RedisConfig>,
    pub audit: AuditConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(ConfigError::InvalidValue("APP_ENV", s.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where records and uploaded files live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_max_document_size")]
    pub max_document_size_mb: u64,
    #[serde(default = "default_max_image_size")]
    pub max_image_size_mb: u64,
}

/// Session store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    Memory,
    Redis,
}

/// Admin session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_ttl")]
    pub ttl_minutes: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub backend: SessionBackend,
    /// JSON file of admin accounts; the built-in demo accounts are used when unset
    #[serde(default)]
    pub admin_accounts_file: Option<PathBuf>,
}

impl SessionConfig {
    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_minutes * 60
    }
}

/// Redis configuration (only needed for the redis session backend)
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Audit log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_audit_max_entries")]
    pub max_entries: usize,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "society-cms".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_max_document_size() -> u64 {
    10
}

fn default_max_image_size() -> u64 {
    5
}

fn default_session_ttl() -> i64 {
    30
}

fn default_cookie_name() -> String {
    "society_session".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_audit_max_entries() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env = match var("APP_ENV") {
            None => Environment::default(),
            Some(s) => s.parse()?,
        };

        let backend = match var("SESSION_BACKEND") {
            None => SessionBackend::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "memory" => SessionBackend::Memory,
                "redis" => SessionBackend::Redis,
                _ => return Err(ConfigError::InvalidValue("SESSION_BACKEND", s)),
            },
        };

        let redis = match var("REDIS_URL") {
            Some(url) => Some(RedisConfig {
                url,
                max_connections: parse_or(
                    var("REDIS_MAX_CONNECTIONS"),
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections,
                )?,
            }),
            None if backend == SessionBackend::Redis => {
                return Err(ConfigError::MissingVar("REDIS_URL"))
            }
            None => None,
        };

        let ttl_minutes: i64 =
            parse_or(var("SESSION_TTL_MINUTES"), "SESSION_TTL_MINUTES", default_session_ttl)?;
        if ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue(
                "SESSION_TTL_MINUTES",
                ttl_minutes.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port: match var("API_PORT") {
                    Some(port) => port
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("API_PORT", port))?,
                    None => return Err(ConfigError::MissingVar("API_PORT")),
                },
            },
            storage: StorageConfig {
                data_dir: var("DATA_DIR").map_or_else(default_data_dir, PathBuf::from),
                upload_dir: var("UPLOAD_DIR").map_or_else(default_upload_dir, PathBuf::from),
                max_document_size_mb: parse_or(
                    var("MAX_DOCUMENT_SIZE_MB"),
                    "MAX_DOCUMENT_SIZE_MB",
                    default_max_document_size,
                )?,
                max_image_size_mb: parse_or(
                    var("MAX_IMAGE_SIZE_MB"),
                    "MAX_IMAGE_SIZE_MB",
                    default_max_image_size,
                )?,
            },
            session: SessionConfig {
                ttl_minutes,
                cookie_name: var("SESSION_COOKIE_NAME").unwrap_or_else(default_cookie_name),
                backend,
                admin_accounts_file: var("ADMIN_ACCOUNTS_FILE").map(PathBuf::from),
            },
            redis,
            audit: AuditConfig {
                max_entries: parse_or(
                    var("AUDIT_MAX_ENTRIES"),
                    "AUDIT_MAX_ENTRIES",
                    default_audit_max_entries,
                )?,
            },
            rate_limit: RateLimitConfig {
                enabled: parse_or(var("RATE_LIMIT_ENABLED"), "RATE_LIMIT_ENABLED", default_true)?,
                requests_per_second: parse_or(
                    var("RATE_LIMIT_REQUESTS_PER_SECOND"),
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parse_or(var("RATE_LIMIT_BURST"), "RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: fn() -> T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, value)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
