//! # Kanban API Server
//!
//! Serves the kanban board JSON API: cookie-session authentication, boards
//! and tasks.
//!
//! ## Usage
//!
//! ```bash
//! STORE_BACKEND=memory cargo run -p kanban-api
//! ```
//!
//! See [`kanban_api::config`] for every environment variable.

use anyhow::Context;
use kanban_api::{
    app::{build_router, AppState},
    config::{Config, SessionBackend, StoreBackend},
};
use kanban_shared::{
    auth::session::{MemorySessionStore, RedisSessionStore, SessionStore},
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    redis::{RedisClient, RedisConfig},
    store::{KanbanStore, MemoryKanbanStore, PgKanbanStore},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Kanban API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Invalid configuration")?;

    let (store, pool) = build_store(&config).await?;
    let sessions = build_sessions(&config).await?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, sessions, config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    tracing::info!("Server stopped");

    Ok(())
}

/// Text logs by default, JSON lines with `LOG_FORMAT=json`
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kanban_api=debug,kanban_shared=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Builds the configured store, plus the pool to close on shutdown when
/// it is PostgreSQL-backed
async fn build_store(config: &Config) -> anyhow::Result<(Arc<dyn KanbanStore>, Option<PgPool>)> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let store: Arc<dyn KanbanStore> = Arc::new(MemoryKanbanStore::new());
            Ok((store, None))
        }
        StoreBackend::Postgres => {
            let url = config
                .store
                .database_url
                .clone()
                .context("DATABASE_URL is required for the postgres store")?;

            ensure_database_exists(&url).await?;

            let pool = create_pool(DatabaseConfig {
                url,
                max_connections: config.store.max_connections,
                ..DatabaseConfig::default()
            })
            .await
            .context("Failed to connect to PostgreSQL")?;

            run_migrations(&pool).await?;

            let store: Arc<dyn KanbanStore> = Arc::new(PgKanbanStore::new(pool.clone()));
            Ok((store, Some(pool)))
        }
    }
}

async fn build_sessions(config: &Config) -> anyhow::Result<Arc<dyn SessionStore>> {
    let ttl = config.session.ttl();

    match config.session.backend {
        SessionBackend::Memory => {
            let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new(ttl));
            Ok(sessions)
        }
        SessionBackend::Redis => {
            let url = config
                .session
                .redis_url
                .clone()
                .context("REDIS_URL is required for redis sessions")?;

            let client = RedisClient::new(RedisConfig::new(url))
                .await
                .context("Failed to connect to Redis")?;

            let sessions: Arc<dyn SessionStore> = Arc::new(RedisSessionStore::new(client, ttl));
            Ok(sessions)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
