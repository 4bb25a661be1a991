//! Per-client session state keyed by an opaque session identifier.
//!
//! Handlers never touch a request-global session; every call names the
//! session it operates on and goes through an injected [`SessionStore`].

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod memory;
pub mod redis;

pub use memory::MemorySessionStore;
pub use self::redis::RedisSessionStore;

/// Session key holding the dashboard visit counter.
pub const VISIT_COUNTER_KEY: &str = "num_visits";

/// Session key binding the session to the driver who logged in.
pub const USER_ID_KEY: &str = "user_id";

/// Opaque session token. Generated at login and carried in the JWT `sid` claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh, unguessable session identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Value under '{key}' is not an integer: {value}")]
    Corrupt { key: String, value: String },

    #[error("Counter under '{key}' would overflow")]
    Overflow { key: String },
}

/// Key/value state partitioned by session.
///
/// Values are strings; counters are stored as decimal integers so both
/// backends can increment them in place.
#[async_trait]
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Read one value, `None` if the session or key does not exist.
    async fn get(&self, session: &SessionId, key: &str)
        -> Result<Option<String>, SessionStoreError>;

    /// Replace one value, creating the session if needed and refreshing its TTL.
    async fn set(&self, session: &SessionId, key: &str, value: &str)
        -> Result<(), SessionStoreError>;

    /// Atomically add `delta` to an integer value (absent counts as 0) and
    /// return the new value.
    async fn increment(
        &self,
        session: &SessionId,
        key: &str,
        delta: i64,
    ) -> Result<i64, SessionStoreError>;

    /// Drop the whole session.
    async fn remove(&self, session: &SessionId) -> Result<(), SessionStoreError>;

    /// Connectivity check used by readiness.
    async fn ping(&self) -> Result<(), SessionStoreError>;
}

/// Parse a stored counter value.
pub(crate) fn parse_counter(key: &str, raw: &str) -> Result<i64, SessionStoreError> {
    raw.parse().map_err(|_| SessionStoreError::Corrupt {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
