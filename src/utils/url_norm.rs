//! Canonical form for stored URLs.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Parses `input` and returns its serialized form.
///
/// Parsing drops ASCII tab and newline characters and percent-encodes what
/// cannot appear in a header, so the stored value is always a valid
/// `Location`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `input` is not an absolute URL.
pub fn normalize_url(input: &str) -> Result<String, AppError> {
    let url = Url::parse(input).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    Ok(url.to_string())
}
