//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching `short_code -> original_url` mappings.
///
/// The cache is a derived read accelerator: the store stays authoritative and
/// entries are never invalidated, only written once per key and possibly
/// evicted by the backend. Callers must treat every error as a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Shared Redis cache with TTL
/// - [`crate::infrastructure::cache::MokaCache`] - In-process bounded cache
/// - [`crate::infrastructure::cache::LayeredCache`] - Local L1 in front of a shared L2
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend is unreachable or misbehaves.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a URL mapping.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend is unreachable or misbehaves.
    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend description for health reporting.
    fn backend(&self) -> &'static str;
}
