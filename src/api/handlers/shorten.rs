//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cancellation::request_token;
use crate::utils::url_norm::normalize_url;

/// Creates a short code for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortCode": "aB3dE9z" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or the URL is not absolute.
/// Returns 503 Service Unavailable if no free code was found within the retry budget.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;
    let original_url = normalize_url(&payload.url)?;

    let (cancel, _guard) = request_token();

    let short_code = state
        .link_service
        .shorten_url(&original_url, &cancel)
        .await?;

    Ok(Json(ShortenResponse { short_code }))
}
