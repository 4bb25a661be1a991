//! In-process session store for development and tests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{parse_counter, SessionId, SessionStore, SessionStoreError};

#[derive(Debug)]
struct Bucket {
    values: HashMap<String, String>,
    expires_at: Instant,
}

impl Bucket {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Sessions held in a map behind one lock, with the same sliding TTL
/// semantics as the Redis store.
#[derive(Debug)]
pub struct MemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<SessionId, Bucket>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Live bucket for `session` with its TTL refreshed. Expired sessions,
    /// including a stale bucket for `session` itself, are evicted first.
    fn bucket_mut<'a>(
        sessions: &'a mut HashMap<SessionId, Bucket>,
        session: &SessionId,
        ttl: Duration,
    ) -> &'a mut Bucket {
        let now = Instant::now();
        sessions.retain(|_, b| !b.is_expired(now));
        let bucket = sessions.entry(session.clone()).or_insert_with(|| Bucket {
            values: HashMap::new(),
            expires_at: now + ttl,
        });
        bucket.expires_at = now + ttl;
        bucket
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(1_209_600))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(
        &self,
        session: &SessionId,
        key: &str,
    ) -> Result<Option<String>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session)
            .filter(|b| !b.is_expired(Instant::now()))
            .and_then(|b| b.values.get(key).cloned()))
    }

    async fn set(
        &self,
        session: &SessionId,
        key: &str,
        value: &str,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let bucket = Self::bucket_mut(&mut sessions, session, self.ttl);
        bucket.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn increment(
        &self,
        session: &SessionId,
        key: &str,
        delta: i64,
    ) -> Result<i64, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let bucket = Self::bucket_mut(&mut sessions, session, self.ttl);
        let current = match bucket.values.get(key) {
            Some(raw) => parse_counter(key, raw)?,
            None => 0,
        };
        let next = current
            .checked_add(delta)
            .ok_or_else(|| SessionStoreError::Overflow {
                key: key.to_string(),
            })?;
        bucket.values.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn remove(&self, session: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(session);
        Ok(())
    }

    async fn ping(&self) -> Result<(), SessionStoreError> {
        Ok(())
    }
}
