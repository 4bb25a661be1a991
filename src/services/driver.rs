//! Driver catalogue: listing and detail with assigned cars.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::car::CarSummary;
use crate::models::driver::{DriverDetail, DriverResponse, DriverSummary};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::{auth, contains_pattern};

pub const DEFAULT_PER_PAGE: i64 = 5;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverFilters {
    pub username: Option<String>,
}

pub async fn list(
    pool: &PgPool,
    filters: &DriverFilters,
    pagination: &Pagination,
) -> Result<PagedResult<DriverSummary>, AppError> {
    let pattern = filters.username.as_deref().map(contains_pattern);

    let (total, items) = tokio::try_join!(
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM drivers WHERE ($1::text IS NULL OR username ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(pool),
        sqlx::query_as::<_, DriverSummary>(
            r#"
            SELECT id, username, first_name, last_name, license_number
            FROM drivers
            WHERE ($1::text IS NULL OR username ILIKE $1)
            ORDER BY username ASC
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

/// Driver profile plus every assigned car with its manufacturer.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<DriverDetail, AppError> {
    let driver = auth::find_driver_by_id(pool, id).await?;

    let cars = sqlx::query_as::<_, CarSummary>(
        r#"
        SELECT c.id, c.model, c.manufacturer_id,
               m.name AS manufacturer_name, m.country AS manufacturer_country
        FROM cars c
        JOIN cars_drivers cd ON cd.car_id = c.id
        JOIN manufacturers m ON m.id = c.manufacturer_id
        WHERE cd.driver_id = $1
        ORDER BY c.model ASC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(DriverDetail {
        driver: DriverResponse::from(driver),
        cars,
    })
}
