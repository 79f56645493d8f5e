//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use serde_json::json;

use crate::domain::visit_event::VisitContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cancellation::request_token;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{shortCode}`
///
/// # Request Flow
///
/// 1. Check cache for the code
/// 2. On cache miss or cache error, query database and fill the cache
/// 3. Queue a visit with the `User-Agent` and `Referer` headers
/// 4. Return 307 Temporary Redirect
///
/// Visit recording is fire-and-forget: a full queue never fails the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let context = VisitContext::new(
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    let (cancel, _guard) = request_token();

    match state.redirect_service.resolve(&code, context, &cancel).await? {
        Some(original_url) => Ok(Redirect::temporary(&original_url)),
        None => Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        )),
    }
}
