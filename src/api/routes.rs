//! API route configuration.

use crate::api::handlers::{list_urls_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short code for a URL
/// - `GET  /urls`    - List all mappings, newest first
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
}
