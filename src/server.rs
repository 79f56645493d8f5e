//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::visit_worker::run_visit_worker;
use crate::infrastructure::cache::{CacheService, LayeredCache, MokaCache, NullCache, RedisCache};
use crate::infrastructure::metrics::{RedirectMetrics, install_prometheus_recorder};
use crate::infrastructure::persistence::{PgUrlRepository, PgVisitRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Cache tiers (in-process, Redis, or none)
/// - Prometheus recorder
/// - Background visit worker
/// - Axum HTTP server
///
/// On Ctrl+C the server stops accepting connections, in-flight requests
/// finish, and the visit worker drains its queue before this returns.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    let cache = build_cache(&config).await;
    tracing::info!(backend = cache.backend(), "Cache ready");

    let prometheus = install_prometheus_recorder();
    let metrics = Arc::new(RedirectMetrics::new());

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);

    let pool = Arc::new(pool);
    let visit_repository = Arc::new(PgVisitRepository::new(pool.clone()));
    let worker = tokio::spawn(run_visit_worker(visit_rx, visit_repository));
    tracing::info!("Visit worker started");

    let url_repository = Arc::new(PgUrlRepository::new(pool));
    let state = AppState::new(url_repository, cache, metrics, visit_tx, prometheus);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last senders; the worker exits once the queue is drained.
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Visit worker panicked");
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the connection pool from the `DB_*` pool settings.
async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Selects the cache stack.
///
/// | Redis | Local capacity | Result |
/// |-------|----------------|--------|
/// | up    | > 0            | `LayeredCache<MokaCache, RedisCache>` |
/// | up    | 0              | `RedisCache` |
/// | down / unset | > 0     | `MokaCache` |
/// | down / unset | 0       | `NullCache` |
async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let ttl = Duration::from_secs(config.cache_ttl_seconds);

    let redis = match &config.redis_url {
        Some(redis_url) => match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => Some(redis),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to connect to Redis, continuing without it");
                None
            }
        },
        None => None,
    };

    let local = config
        .is_local_cache_enabled()
        .then(|| MokaCache::new(config.local_cache_capacity, ttl));

    match (local, redis) {
        (Some(local), Some(redis)) => Arc::new(LayeredCache::new(local, redis)),
        (None, Some(redis)) => Arc::new(redis),
        (Some(local), None) => Arc::new(local),
        (None, None) => Arc::new(NullCache::new()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
