//! Authentication gate: JWT extractor bound to a live session.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::auth as auth_service;
use crate::session::SessionId;
use crate::AppState;

/// Cookie carrying the access token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticated driver extracted from the access token.
///
/// Use as an Axum extractor in handlers that require authentication:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
/// Requests without a valid token for a live session are rejected with 401
/// before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub session_id: SessionId,
}

/// Bearer header wins; the cookie is the fallback for browser clients.
fn token_from_parts(parts: &Parts) -> Option<String> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        return header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);
    }
    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(AppError::Unauthorized)?;
        let claims = auth_service::validate_token(&token, &state.config.jwt_secret)?;

        if claims.token_type != "access" {
            return Err(AppError::Unauthorized);
        }

        let user_id: Uuid = claims
            .user_id
            .parse()
            .map_err(|_| AppError::Unauthorized)?;

        auth_service::ensure_session(state.sessions.as_ref(), &claims).await?;

        Ok(CurrentUser {
            id: user_id,
            username: claims.sub,
            session_id: claims.sid,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_header_is_read() {
        let p = parts(Request::builder().header("Authorization", "Bearer abc.def.ghi"));
        assert_eq!(token_from_parts(&p).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn non_bearer_header_is_ignored() {
        let p = parts(
            Request::builder()
                .header("Authorization", "Basic Zm9vOmJhcg==")
                .header("Cookie", "access_token=from-cookie"),
        );
        assert_eq!(token_from_parts(&p), None);
    }

    #[test]
    fn cookie_is_the_fallback() {
        let p = parts(Request::builder().header("Cookie", "theme=dark; access_token=tok"));
        assert_eq!(token_from_parts(&p).as_deref(), Some("tok"));
    }

    #[test]
    fn no_credentials() {
        assert_eq!(token_from_parts(&parts(Request::builder())), None);
    }
}
