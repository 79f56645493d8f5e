//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Counts stored mappings
/// 2. **Visit Queue**: Checks if channel is open and reports free capacity
/// 3. **Cache**: Pings the configured cache backend
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 short links" },
///     "visit_queue": { "status": "ok", "message": "Capacity: 10000" },
///     "cache": { "status": "ok", "message": "Backend: memory+redis" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let queue_check = check_visit_queue(&state);

    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && queue_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            visit_queue: queue_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_service.count_urls().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {} short links", count)),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

/// Checks if the visit tracking queue is operational.
fn check_visit_queue(state: &AppState) -> CheckStatus {
    if state.visit_sender.is_closed() {
        CheckStatus::error("Visit queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.visit_sender.capacity()))
    }
}

/// A disabled cache counts as healthy.
async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();

    if state.cache.health_check().await {
        CheckStatus::ok(format!("Backend: {}", backend))
    } else {
        CheckStatus::error(format!("Backend {} unreachable", backend))
    }
}
