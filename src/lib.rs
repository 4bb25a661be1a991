pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::EntityStore;
use crate::services::dashboard::DashboardService;
use crate::session::SessionStore;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub sessions: Arc<dyn SessionStore>,
    pub dashboard: DashboardService,
}

impl AppState {
    /// Wire the dashboard to the given stores using the configured counter mode.
    pub fn new(
        db: PgPool,
        config: config::AppConfig,
        sessions: Arc<dyn SessionStore>,
        entities: Arc<dyn EntityStore>,
    ) -> Self {
        let dashboard =
            DashboardService::new(sessions.clone(), entities, config.visit_counter_mode);
        Self {
            db,
            config,
            sessions,
            dashboard,
        }
    }
}
