//! Process-local session store
//!
//! Sessions are lost on restart, which is acceptable for a single-process deployment.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use dashmap::DashMap;
use society_common::generate_session_token;
use society_core::{AdminUser, RepoResult};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::store::{SessionData, SessionStore};

/// Sessions keyed by token in a `DashMap`
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionData>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// Number of stored sessions, expired ones included
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user: &AdminUser) -> RepoResult<SessionData> {
        let session = SessionData::new(generate_session_token(), user, self.clock.now());
        self.sessions.insert(session.id.clone(), session.clone());
        debug!(user_id = %user.id, "Session created");
        Ok(session)
    }

    async fn validate(&self, token: &str) -> RepoResult<Option<SessionData>> {
        let now = self.clock.now();
        let ttl = self.ttl;

        if self
            .sessions
            .remove_if(token, |_, session| session.is_expired(now, ttl))
            .is_some()
        {
            debug!("Expired session evicted");
            return Ok(None);
        }

        Ok(self.sessions.get_mut(token).map(|mut session| {
            session.last_activity = now;
            session.clone()
        }))
    }

    async fn destroy(&self, token: &str) -> RepoResult<bool> {
        Ok(self.sessions.remove(token).is_some())
    }

    async fn purge_expired(&self) -> RepoResult<usize> {
        let now = self.clock.now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(now, self.ttl));
        Ok(before.saturating_sub(self.sessions.len()))
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ManualClock;
    use society_core::Role;

    fn store() -> (InMemorySessionStore, ManualClock) {
        let clock = ManualClock::default();
        let store = InMemorySessionStore::with_clock(Duration::minutes(30), Arc::new(clock.clone()));
        (store, clock)
    }

    fn editor() -> AdminUser {
        AdminUser::new("2", "editor@society.local", "Content Editor", Role::Editor)
    }

    #[tokio::test]
    async fn test_validate_refreshes_activity() {
        let (store, clock) = store();
        let session = store.create(&editor()).await.unwrap();

        clock.advance(Duration::minutes(20));
        let seen = store.validate(&session.id).await.unwrap().unwrap();
        assert_eq!(seen.user.email, "editor@society.local");
        assert_eq!(seen.last_activity, session.last_activity + Duration::minutes(20));

        // 40 minutes after creation but only 20 after the last access
        clock.advance(Duration::minutes(20));
        assert!(store.validate(&session.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_idle_session_expires_and_is_evicted() {
        let (store, clock) = store();
        let session = store.create(&editor()).await.unwrap();

        clock.advance(Duration::minutes(30));
        assert!(store.validate(&session.id).await.unwrap().is_some());

        clock.advance(Duration::minutes(30) + Duration::seconds(1));
        assert!(store.validate(&session.id).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_destroy() {
        let (store, _) = store();
        let session = store.create(&editor()).await.unwrap();
        assert!(store.destroy(&session.id).await.unwrap());
        assert!(!store.destroy(&session.id).await.unwrap());
        assert!(store.validate(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let (store, clock) = store();
        store.create(&editor()).await.unwrap();
        clock.advance(Duration::minutes(31));
        let fresh = store.create(&editor()).await.unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.validate(&fresh.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let (store, _) = store();
        assert!(store.validate("missing").await.unwrap().is_none());
    }
}
