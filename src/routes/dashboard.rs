//! Dashboard route: catalogue counts and the session's visit counter.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::services::dashboard::DashboardSnapshot;
use crate::AppState;

/// GET /api/v1/dashboard — records a visit and returns the snapshot.
pub async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardSnapshot>>, AppError> {
    let snapshot = state.dashboard.get_dashboard(&user.session_id).await?;
    Ok(ApiResponse::success(snapshot))
}
