//! # society-cache
//!
//! Admin session storage.
//!
//! ## Features
//!
//! - **Session Store**: `SessionStore` port with sliding idle expiry
//! - **In-memory sessions**: `DashMap` table with an injectable clock (default)
//! - **Redis sessions**: deadpool-redis pool with TTL-based expiry
//!
//! ## Example
//!
//! ```ignore
//! use society_cache::{InMemorySessionStore, SessionStore};
//!
//! let sessions = InMemorySessionStore::new(chrono::Duration::minutes(30));
//! let session = sessions.create(&user).await?;
//! assert!(sessions.validate(&session.id).await?.is_some());
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use session::{
    Clock, InMemorySessionStore, ManualClock, RedisSessionStore, SessionData, SessionStore,
    SystemClock,
};
