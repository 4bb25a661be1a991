//! Car catalogue: listing with manufacturer, detail with drivers, creation.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::car::{CarDetail, CarSummary, CreateCar};
use crate::models::driver::DriverSummary;
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::{contains_pattern, manufacturer};

pub const DEFAULT_PER_PAGE: i64 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarFilters {
    pub model: Option<String>,
}

const SUMMARY_COLUMNS: &str = "c.id, c.model, c.manufacturer_id, \
     m.name AS manufacturer_name, m.country AS manufacturer_country";

pub async fn list(
    pool: &PgPool,
    filters: &CarFilters,
    pagination: &Pagination,
) -> Result<PagedResult<CarSummary>, AppError> {
    let pattern = filters.model.as_deref().map(contains_pattern);
    let data_sql = format!(
        "SELECT {SUMMARY_COLUMNS} \
         FROM cars c JOIN manufacturers m ON m.id = c.manufacturer_id \
         WHERE ($1::text IS NULL OR c.model ILIKE $1) \
         ORDER BY c.model ASC, c.id ASC \
         LIMIT $2 OFFSET $3"
    );

    let (total, items) = tokio::try_join!(
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cars WHERE ($1::text IS NULL OR model ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(pool),
        sqlx::query_as::<_, CarSummary>(&data_sql)
            .bind(&pattern)
            .bind(pagination.limit(DEFAULT_PER_PAGE))
            .bind(pagination.offset(DEFAULT_PER_PAGE))
            .fetch_all(pool),
    )?;

    Ok(PagedResult::new(items, total, pagination, DEFAULT_PER_PAGE))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<CarDetail, AppError> {
    let (model, manufacturer_id) =
        sqlx::query_as::<_, (String, Uuid)>("SELECT model, manufacturer_id FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    let (manufacturer, drivers) = tokio::try_join!(
        manufacturer::find_by_id(pool, manufacturer_id),
        drivers_of(pool, id),
    )?;

    Ok(CarDetail {
        id,
        model,
        manufacturer,
        drivers,
    })
}

async fn drivers_of(pool: &PgPool, car_id: Uuid) -> Result<Vec<DriverSummary>, AppError> {
    let rows = sqlx::query_as::<_, DriverSummary>(
        r#"
        SELECT d.id, d.username, d.first_name, d.last_name, d.license_number
        FROM drivers d
        JOIN cars_drivers cd ON cd.driver_id = d.id
        WHERE cd.car_id = $1
        ORDER BY d.username ASC
        "#,
    )
    .bind(car_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a car and its driver assignments in one transaction.
pub async fn create(pool: &PgPool, input: &CreateCar) -> Result<CarDetail, AppError> {
    let mut tx = pool.begin().await?;

    let manufacturer_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM manufacturers WHERE id = $1)")
            .bind(input.manufacturer_id)
            .fetch_one(&mut *tx)
            .await?;
    if !manufacturer_exists {
        return Err(AppError::Validation(format!(
            "Unknown manufacturer {}",
            input.manufacturer_id
        )));
    }

    let car_id: Uuid = sqlx::query_scalar(
        "INSERT INTO cars (model, manufacturer_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(input.model.trim())
    .bind(input.manufacturer_id)
    .fetch_one(&mut *tx)
    .await?;

    if !input.driver_ids.is_empty() {
        let assigned = sqlx::query(
            r#"
            INSERT INTO cars_drivers (car_id, driver_id)
            SELECT $1, d.id FROM drivers d WHERE d.id = ANY($2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(car_id)
        .bind(&input.driver_ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let mut requested = input.driver_ids.clone();
        requested.sort_unstable();
        requested.dedup();
        if assigned as usize != requested.len() {
            return Err(AppError::Validation(
                "One or more drivers do not exist".to_string(),
            ));
        }
    }

    tx.commit().await?;
    tracing::info!(car_id = %car_id, model = %input.model, "Car created");

    find_by_id(pool, car_id).await
}
