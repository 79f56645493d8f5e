//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`     - Create a short code
//! - `GET  /urls`        - List all mappings
//! - `GET  /health`      - Health check: DB, cache, visit queue
//! - `GET  /metrics`     - Prometheus scrape endpoint
//! - `GET  /{shortCode}` - Short link redirect
//!
//! Fixed routes take precedence over `/{shortCode}`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, metrics_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::link_routes())
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
