//! Database connection pool and the entity count interface.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod entity_store;

pub use entity_store::{EntityKind, EntityStore, PgEntityStore};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
