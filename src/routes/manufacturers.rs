//! Manufacturer routes.

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::manufacturer::{CreateManufacturer, Manufacturer};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::manufacturer::{self as manufacturer_service, ManufacturerFilters};
use crate::AppState;

/// GET /api/v1/manufacturers — paginated, ordered by name.
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<ManufacturerFilters>,
) -> Result<Json<ApiResponse<PagedResult<Manufacturer>>>, AppError> {
    let result = manufacturer_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/manufacturers
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<CreateManufacturer>,
) -> Result<Json<ApiResponse<Manufacturer>>, AppError> {
    body.validate()?;
    let manufacturer = manufacturer_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(manufacturer))
}
