//! Health check endpoints for liveness and readiness.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub sessions: String,
}

/// Liveness: always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness: checks database and session store connectivity.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let (db, sessions) = tokio::join!(
        sqlx::query("SELECT 1").execute(&state.db),
        state.sessions.ping(),
    );

    let database = match db {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            format!("error: {e}")
        }
    };
    let sessions = match sessions {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Session store health check failed");
            format!("error: {e}")
        }
    };

    let status = if database == "connected" && sessions == "connected" {
        "ok"
    } else {
        "degraded"
    };

    ApiResponse::success(HealthStatus {
        status: status.to_string(),
        database,
        sessions,
    })
}
