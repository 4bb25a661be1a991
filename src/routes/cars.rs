//! Car routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::car::{CarDetail, CarSummary, CreateCar};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::car::{self as car_service, CarFilters};
use crate::AppState;

/// GET /api/v1/cars — paginated, manufacturer included.
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<CarFilters>,
) -> Result<Json<ApiResponse<PagedResult<CarSummary>>>, AppError> {
    let result = car_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/cars/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CarDetail>>, AppError> {
    let car = car_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(car))
}

/// POST /api/v1/cars
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<CreateCar>,
) -> Result<Json<ApiResponse<CarDetail>>, AppError> {
    body.validate()?;
    let car = car_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(car))
}
