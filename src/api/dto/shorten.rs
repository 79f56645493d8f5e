//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be an absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Response carrying the newly created short code.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
}
