//! Driver routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::driver::{CreateDriver, DriverDetail, DriverResponse, DriverSummary};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::auth as auth_service;
use crate::services::driver::{self as driver_service, DriverFilters};
use crate::AppState;

/// GET /api/v1/drivers — paginated, ordered by username.
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<DriverFilters>,
) -> Result<Json<ApiResponse<PagedResult<DriverSummary>>>, AppError> {
    let result = driver_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/drivers/:id — profile with assigned cars.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DriverDetail>>, AppError> {
    let driver = driver_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(driver))
}

/// POST /api/v1/drivers — register a driver account.
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<CreateDriver>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    body.validate()?;
    let driver = auth_service::create_driver(&state.db, &body).await?;
    Ok(ApiResponse::success(DriverResponse::from(driver)))
}
