//! DTOs for the URL listing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortenedUrl;

/// One stored mapping.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlItem {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<ShortenedUrl> for UrlItem {
    fn from(url: ShortenedUrl) -> Self {
        Self {
            short_code: url.short_code,
            original_url: url.original_url,
            created_at: url.created_at,
        }
    }
}
