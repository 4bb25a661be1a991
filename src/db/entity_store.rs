//! Typed count access to the fleet catalogue tables.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;

/// The countable collections shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Manufacturer,
    Car,
    Driver,
}

impl EntityKind {
    fn table(self) -> &'static str {
        match self {
            Self::Manufacturer => "manufacturers",
            Self::Car => "cars",
            Self::Driver => "drivers",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Read-only count source for the dashboard.
#[async_trait]
pub trait EntityStore: Send + Sync + fmt::Debug {
    async fn count(&self, kind: EntityKind) -> Result<i64, sqlx::Error>;
}

/// Counts straight from PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgEntityStore {
    pool: PgPool,
}

impl PgEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn count(&self, kind: EntityKind) -> Result<i64, sqlx::Error> {
        // Table names come from a closed enum, never from input.
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await
    }
}
