//! Authentication routes: login, refresh, logout, profile.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::{CurrentUser, ACCESS_TOKEN_COOKIE};
use crate::models::driver::DriverResponse;
use crate::services::auth as auth_service;
use crate::services::auth::TokenPair;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

fn access_cookie(token: String) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/v1/auth/login — opens a session and sets the access cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenPair>>), AppError> {
    let tokens = auth_service::login(
        &state.db,
        state.sessions.as_ref(),
        &state.config,
        &body.username,
        &body.password,
    )
    .await?;

    let jar = jar.add(access_cookie(tokens.access_token.clone()));
    Ok((jar, ApiResponse::success(tokens)))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RefreshRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenPair>>), AppError> {
    let tokens = auth_service::refresh_token(
        &state.db,
        state.sessions.as_ref(),
        &state.config,
        &body.refresh_token,
    )
    .await?;

    let jar = jar.add(access_cookie(tokens.access_token.clone()));
    Ok((jar, ApiResponse::success(tokens)))
}

/// POST /api/v1/auth/logout — destroys the server-side session.
pub async fn logout(
    State(state): State<AppState>,
    current_user: CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<&'static str>>), AppError> {
    auth_service::logout(state.sessions.as_ref(), &current_user.session_id).await?;
    let jar = jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"));
    Ok((jar, ApiResponse::success("Logged out successfully")))
}

/// GET /api/v1/auth/me — current driver profile
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let driver = auth_service::find_driver_by_id(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(DriverResponse::from(driver)))
}
