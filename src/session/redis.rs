//! Redis-backed session store.
//!
//! Each session is one hash at `session:{id}`; every write refreshes the
//! key's TTL so idle sessions expire on their own.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;

use super::{SessionId, SessionStore, SessionStoreError};

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl RedisSessionStore {
    /// Open a multiplexed connection to `redis_url`.
    pub async fn connect(redis_url: &str, ttl_secs: u64) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        tracing::info!(ttl_secs, "Connected to Redis session store");
        Ok(Self { conn, ttl_secs })
    }

    fn key(session: &SessionId) -> String {
        format!("session:{session}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(
        &self,
        session: &SessionId,
        key: &str,
    ) -> Result<Option<String>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let value = redis::cmd("HGET")
            .arg(Self::key(session))
            .arg(key)
            .query_async::<Option<String>>(&mut conn)
            .await?;
        Ok(value)
    }

    async fn set(
        &self,
        session: &SessionId,
        key: &str,
        value: &str,
    ) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        let redis_key = Self::key(session);
        redis::pipe()
            .atomic()
            .cmd("HSET")
            .arg(&redis_key)
            .arg(key)
            .arg(value)
            .ignore()
            .cmd("EXPIRE")
            .arg(&redis_key)
            .arg(self.ttl_secs)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn increment(
        &self,
        session: &SessionId,
        key: &str,
        delta: i64,
    ) -> Result<i64, SessionStoreError> {
        let mut conn = self.conn.clone();
        let redis_key = Self::key(session);
        // HINCRBY is atomic server-side; MULTI keeps the TTL refresh with it.
        let (value,): (i64,) = redis::pipe()
            .atomic()
            .cmd("HINCRBY")
            .arg(&redis_key)
            .arg(key)
            .arg(delta)
            .cmd("EXPIRE")
            .arg(&redis_key)
            .arg(self.ttl_secs)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(value)
    }

    async fn remove(&self, session: &SessionId) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(Self::key(session))
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}
