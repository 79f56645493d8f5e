//! Handler for listing every stored mapping.

use axum::{Json, extract::State};

use crate::api::dto::urls::UrlItem;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cancellation::request_token;

/// Lists all mappings, newest first.
///
/// # Endpoint
///
/// `GET /urls`
///
/// # Response
///
/// ```json
/// [
///   {
///     "shortCode": "aB3dE9z",
///     "originalUrl": "https://example.com",
///     "createdAt": "2025-01-01T12:00:00Z"
///   }
/// ]
/// ```
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlItem>>, AppError> {
    let (cancel, _guard) = request_token();

    let urls = state.link_service.list_urls(&cancel).await?;

    Ok(Json(urls.into_iter().map(UrlItem::from).collect()))
}
