//! Session data and the session store port

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use society_core::{AdminUser, RepoResult};

/// One signed-in admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// Opaque token, also the cookie value
    pub id: String,
    pub user_id: String,
    pub user: AdminUser,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String, user: &AdminUser, now: DateTime<Utc>) -> Self {
        Self {
            id: token,
            user_id: user.id.clone(),
            user: user.clone(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Idle for longer than `ttl`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_activity > ttl
    }
}

/// Session table with a sliding idle timeout
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a session for `user` and return it; `id` is the new token
    async fn create(&self, user: &AdminUser) -> RepoResult<SessionData>;

    /// Look up a session and refresh its activity. Expired sessions are
    /// evicted and reported as absent.
    async fn validate(&self, token: &str) -> RepoResult<Option<SessionData>>;

    /// Remove a session; `false` when it did not exist
    async fn destroy(&self, token: &str) -> RepoResult<bool>;

    /// Evict every expired session, returning how many were removed
    async fn purge_expired(&self) -> RepoResult<usize>;

    /// Idle timeout
    fn ttl(&self) -> Duration;
}
