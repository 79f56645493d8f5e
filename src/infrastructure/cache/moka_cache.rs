//! In-process cache backed by Moka.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::trace;

/// Bounded in-memory cache local to one service instance.
///
/// Serves as the L1 layer in front of Redis, or as the only cache when Redis is
/// not configured. Operations never fail.
#[derive(Clone)]
pub struct MokaCache {
    cache: Cache<String, String>,
}

impl MokaCache {
    /// Creates a cache holding at most `max_capacity` entries, each expiring
    /// `ttl` after insertion.
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Drops a single entry, as an eviction by the backend would.
    pub async fn evict(&self, short_code: &str) {
        self.cache.invalidate(short_code).await;
    }
}

#[async_trait]
impl CacheService for MokaCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let cached = self.cache.get(short_code).await;
        trace!(short_code, hit = cached.is_some(), "Local cache lookup");
        Ok(cached)
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        self.cache
            .insert(short_code.to_string(), original_url.to_string())
            .await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
