//! Redis-backed session store
//!
//! Survives restarts and can be shared by several API processes. Expiry is
//! delegated to Redis: every successful validation rewrites the key with a fresh TTL.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use society_common::generate_session_token;
use society_core::{AdminUser, RepoResult};
use tracing::debug;

use super::store::{SessionData, SessionStore};
use crate::pool::RedisPool;

/// Key prefix for admin sessions
const SESSION_PREFIX: &str = "society:session:";

pub struct RedisSessionStore {
    pool: RedisPool,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(pool: RedisPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    fn key(token: &str) -> String {
        format!("{SESSION_PREFIX}{token}")
    }

    fn ttl_seconds(&self) -> u64 {
        u64::try_from(self.ttl.num_seconds()).unwrap_or(1).max(1)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user: &AdminUser) -> RepoResult<SessionData> {
        let session = SessionData::new(generate_session_token(), user, Utc::now());
        self.pool
            .set_json(&Self::key(&session.id), &session, self.ttl_seconds())
            .await?;
        debug!(user_id = %user.id, "Session created");
        Ok(session)
    }

    async fn validate(&self, token: &str) -> RepoResult<Option<SessionData>> {
        let key = Self::key(token);
        let Some(mut session) = self.pool.get_json::<SessionData>(&key).await? else {
            return Ok(None);
        };

        session.last_activity = Utc::now();
        self.pool.set_json(&key, &session, self.ttl_seconds()).await?;
        Ok(Some(session))
    }

    async fn destroy(&self, token: &str) -> RepoResult<bool> {
        Ok(self.pool.delete(&Self::key(token)).await?)
    }

    async fn purge_expired(&self) -> RepoResult<usize> {
        // Redis evicts expired keys itself; only check that it answers
        self.pool.health_check().await?;
        Ok(0)
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
