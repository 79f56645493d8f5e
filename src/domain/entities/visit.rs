//! Visit entity representing a single successful redirect.

use chrono::{DateTime, Utc};

/// A visit recorded after a short code was resolved.
///
/// Client metadata is optional: requests without `User-Agent` or `Referer`
/// headers still produce a visit.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Visit {
    pub id: i64,
    pub short_code: String,
    pub visited_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Input data for recording a new visit.
///
/// The timestamp is set by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub short_code: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}
