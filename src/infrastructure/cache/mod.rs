//! Caching layer for fast redirect lookups.
//!
//! Provides a [`CacheService`] trait with four implementations:
//! - [`RedisCache`] - Shared Redis cache
//! - [`MokaCache`] - Per-instance in-memory cache
//! - [`LayeredCache`] - Moka L1 in front of Redis L2
//! - [`NullCache`] - No-op implementation for disabled caching

mod layered_cache;
mod moka_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use layered_cache::LayeredCache;
pub use moka_cache::MokaCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
