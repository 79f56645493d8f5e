//! Repository trait for short code mappings.

use crate::domain::entities::ShortenedUrl;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for `short_code -> original_url` mappings.
///
/// The store is the source of truth for mappings and the only place where
/// short code uniqueness is enforced.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping and returns the stored short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] only when the short code is already taken.
    /// Returns [`AppError::Internal`] on any other database error.
    async fn insert_mapping(&self, short_code: &str, original_url: &str)
    -> Result<String, AppError>;

    /// Looks up the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if no mapping exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_url(&self, short_code: &str) -> Result<Option<String>, AppError>;

    /// Lists every mapping, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<ShortenedUrl>, AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
