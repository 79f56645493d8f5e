//! Repository trait for visit records.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for raw visit logging.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends a visit record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a visit for
    /// a short code that does not exist.
    async fn insert_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Counts the visits recorded for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_code(&self, short_code: &str) -> Result<i64, AppError>;
}
