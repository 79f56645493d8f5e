//! Shortened URL entity: the `short_code -> original_url` mapping.

use chrono::{DateTime, Utc};

/// A persisted short code mapping.
///
/// Created exactly once by [`crate::application::services::LinkService`] and never
/// updated afterwards. `created_at` is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortenedUrl {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortenedUrl {
    /// Creates a new ShortenedUrl instance.
    pub fn new(short_code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            original_url,
            created_at,
        }
    }
}
