use std::{net::SocketAddr, sync::Arc, time::Duration};

use mimalloc::MiMalloc;
use taxi::config::{AppConfig, SessionBackend};
use taxi::db::{self, PgEntityStore};
use taxi::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use taxi::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taxi=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()?;

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let sessions: Arc<dyn SessionStore> = match config.session_backend {
        SessionBackend::Redis => {
            Arc::new(RedisSessionStore::connect(&config.redis_url, config.session_ttl_secs).await?)
        }
        SessionBackend::Memory => {
            tracing::warn!("Using in-memory sessions; they will not survive a restart");
            Arc::new(MemorySessionStore::new(Duration::from_secs(
                config.session_ttl_secs,
            )))
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let entities = Arc::new(PgEntityStore::new(pool.clone()));
    let state = AppState::new(pool, config, sessions, entities);
    tracing::info!(
        host = %addr,
        counter_mode = ?state.dashboard.mode(),
        "Starting taxi fleet API server"
    );
    let app = taxi::routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
