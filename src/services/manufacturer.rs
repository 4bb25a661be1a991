//! Manufacturer catalogue: listing and creation.

use serde::Deserialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::manufacturer::{CreateManufacturer, Manufacturer};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::contains_pattern;

pub const DEFAULT_PER_PAGE: i64 = 5;

/// Optional name filter for the manufacturer list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManufacturerFilters {
    pub name: Option<String>,
}

pub async fn list(
    pool: &PgPool,
    filters: &ManufacturerFilters,
    pagination: &Pagination,
) -> Result<PagedResult<Manufacturer>, AppError> {
    let pattern = filters.name.as_deref().map(contains_pattern);

    let (total, items) = tokio::try_join!(
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM manufacturers WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(pool),
        sqlx::query_as::<_, Manufacturer>(
            r#"
            SELECT id, name, country
            FROM manufacturers
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(pagination.limit(DEFAULT_PER_PAGE))
        .bind(pagination.offset(DEFAULT_PER_PAGE))
        .fetch_all(pool),
    )?;

    Ok(PagedResult::new(items, total, pagination, DEFAULT_PER_PAGE))
}

pub async fn create(pool: &PgPool, input: &CreateManufacturer) -> Result<Manufacturer, AppError> {
    sqlx::query_as::<_, Manufacturer>(
        "INSERT INTO manufacturers (name, country) VALUES ($1, $2) RETURNING id, name, country",
    )
    .bind(input.name.trim())
    .bind(input.country.trim())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(format!("Manufacturer '{}' already exists", input.name.trim()))
        }
        _ => AppError::Database(e),
    })
}

pub async fn find_by_id(pool: &PgPool, id: uuid::Uuid) -> Result<Manufacturer, AppError> {
    sqlx::query_as::<_, Manufacturer>("SELECT id, name, country FROM manufacturers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Manufacturer not found".to_string()))
}
