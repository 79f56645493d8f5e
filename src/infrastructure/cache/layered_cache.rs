//! Two-level cache: local L1 in front of a shared L2.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Composes a fast local cache with a shared distributed one.
///
/// - **Get**: try L1, then L2. An L2 hit is backfilled into L1.
/// - **Set**: write-through to L1, then L2.
///
/// L1 failures are logged and skipped. L2 failures are returned so the caller
/// can degrade to the database.
pub struct LayeredCache<L1, L2> {
    l1: L1,
    l2: L2,
}

impl<L1, L2> LayeredCache<L1, L2> {
    pub fn new(l1: L1, l2: L2) -> Self {
        Self { l1, l2 }
    }

    #[cfg(test)]
    fn l1(&self) -> &L1 {
        &self.l1
    }
}

#[async_trait]
impl<L1, L2> CacheService for LayeredCache<L1, L2>
where
    L1: CacheService,
    L2: CacheService,
{
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        match self.l1.get_url(short_code).await {
            Ok(Some(url)) => {
                debug!(short_code, "L1 cache hit");
                return Ok(Some(url));
            }
            Ok(None) => {}
            Err(e) => warn!(short_code, error = %e, "L1 cache lookup failed"),
        }

        let cached = self.l2.get_url(short_code).await?;

        if let Some(url) = &cached {
            debug!(short_code, "L2 cache hit, backfilling L1");
            if let Err(e) = self.l1.set_url(short_code, url).await {
                warn!(short_code, error = %e, "L1 backfill failed");
            }
        }

        Ok(cached)
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        if let Err(e) = self.l1.set_url(short_code, original_url).await {
            warn!(short_code, error = %e, "L1 cache write failed");
        }

        self.l2.set_url(short_code, original_url).await
    }

    async fn health_check(&self) -> bool {
        self.l1.health_check().await && self.l2.health_check().await
    }

    fn backend(&self) -> &'static str {
        "memory+redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::{CacheError, MockCacheService, MokaCache};
    use std::time::Duration;

    fn l1() -> MokaCache {
        MokaCache::new(100, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_l1_hit_skips_l2() {
        let mut l2 = MockCacheService::new();
        l2.expect_get_url().times(0);

        let cache = LayeredCache::new(l1(), l2);
        cache.l1().set_url("aB3dE9z", "https://example.com").await.unwrap();

        let cached = cache.get_url("aB3dE9z").await.unwrap();
        assert_eq!(cached.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_l2_hit_backfills_l1() {
        let mut l2 = MockCacheService::new();
        l2.expect_get_url()
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let cache = LayeredCache::new(l1(), l2);

        let cached = cache.get_url("aB3dE9z").await.unwrap();
        assert_eq!(cached.as_deref(), Some("https://example.com"));

        let backfilled = cache.l1().get_url("aB3dE9z").await.unwrap();
        assert_eq!(backfilled.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_l2_error_is_returned() {
        let mut l2 = MockCacheService::new();
        l2.expect_get_url()
            .times(1)
            .returning(|_| Err(CacheError::OperationError("connection reset".to_string())));

        let cache = LayeredCache::new(l1(), l2);

        assert!(cache.get_url("aB3dE9z").await.is_err());
    }

    #[tokio::test]
    async fn test_set_writes_both_layers() {
        let mut l2 = MockCacheService::new();
        l2.expect_set_url()
            .withf(|code, url| code == "aB3dE9z" && url == "https://example.com")
            .times(1)
            .returning(|_, _| Ok(()));

        let cache = LayeredCache::new(l1(), l2);
        cache.set_url("aB3dE9z", "https://example.com").await.unwrap();

        let local = cache.l1().get_url("aB3dE9z").await.unwrap();
        assert_eq!(local.as_deref(), Some("https://example.com"));
    }
}
