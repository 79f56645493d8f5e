//! Short code resolution service.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::repositories::UrlRepository;
use crate::domain::visit_event::{VisitContext, VisitEvent};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::metrics::RedirectMetrics;
use crate::utils::cancellation::with_cancellation;
use crate::utils::code_generator::is_valid_code;

/// Resolves short codes to their original URLs.
///
/// # Lookup Strategy
///
/// - **Cache hit**: the cached URL is used directly
/// - **Cache miss**: query the database and fill the cache with the result
/// - **Cache error**: log and fall back to the database
///
/// Codes that could never have been generated are unknown without any lookup.
/// Every outcome bumps exactly one redirect counter. A successful resolution
/// also enqueues a visit; a full queue drops the visit, never the redirect.
pub struct RedirectService<R: UrlRepository> {
    url_repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    metrics: Arc<RedirectMetrics>,
    visit_sender: mpsc::Sender<VisitEvent>,
}

impl<R: UrlRepository> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(
        url_repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        metrics: Arc<RedirectMetrics>,
        visit_sender: mpsc::Sender<VisitEvent>,
    ) -> Self {
        Self {
            url_repository,
            cache,
            metrics,
            visit_sender,
        }
    }

    /// Resolves `short_code` to its original URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the code is known
    /// - `Ok(None)` if it is not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database lookup fails.
    /// Returns [`AppError::Cancelled`] if `cancel` fires at any I/O point.
    pub async fn resolve(
        &self,
        short_code: &str,
        context: VisitContext,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, AppError> {
        if !is_valid_code(short_code) {
            debug!(short_code, "Malformed short code");
            self.metrics.record_failed_redirect(short_code);
            return Ok(None);
        }

        let Some(original_url) = self.lookup(short_code, cancel).await? else {
            self.metrics.record_failed_redirect(short_code);
            return Ok(None);
        };

        self.record_visit(short_code, context);
        self.metrics.record_redirect(short_code);

        Ok(Some(original_url))
    }

    async fn lookup(
        &self,
        short_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, AppError> {
        if cancel.is_cancelled() {
            return Err(AppError::cancelled());
        }

        match with_cancellation(cancel, self.cache.get_url(short_code)).await? {
            Ok(Some(url)) => {
                debug!(short_code, "Cache HIT");
                return Ok(Some(url));
            }
            Ok(None) => debug!(short_code, "Cache MISS"),
            Err(e) => warn!(short_code, error = %e, "Cache lookup failed, falling back to database"),
        }

        let found = with_cancellation(cancel, self.url_repository.find_url(short_code)).await??;

        if let Some(url) = &found
            && let Err(e) = with_cancellation(cancel, self.cache.set_url(short_code, url)).await?
        {
            warn!(short_code, error = %e, "Failed to fill cache");
        }

        Ok(found)
    }

    fn record_visit(&self, short_code: &str, context: VisitContext) {
        if let Err(e) = self
            .visit_sender
            .try_send(VisitEvent::new(short_code, context))
        {
            warn!(short_code, error = %e, "Failed to enqueue visit event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::{CacheError, MockCacheService, MokaCache, NullCache};
    use serde_json::json;
    use std::time::Duration;

    struct Harness {
        metrics: Arc<RedirectMetrics>,
        visits: mpsc::Receiver<VisitEvent>,
    }

    fn service(
        repo: MockUrlRepository,
        cache: Arc<dyn CacheService>,
    ) -> (RedirectService<MockUrlRepository>, Harness) {
        let metrics = Arc::new(RedirectMetrics::new());
        let (tx, rx) = mpsc::channel(16);
        let service = RedirectService::new(Arc::new(repo), cache, metrics.clone(), tx);
        (
            service,
            Harness {
                metrics,
                visits: rx,
            },
        )
    }

    fn moka() -> Arc<MokaCache> {
        Arc::new(MokaCache::new(100, Duration::from_secs(60)))
    }

    #[tokio::test]
    async fn test_resolve_cache_hit_skips_database() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_url().times(0);

        let cache = moka();
        cache.set_url("aB3dE9z", "https://example.com").await.unwrap();

        let (service, mut harness) = service(mock_repo, cache);
        let url = service
            .resolve("aB3dE9z", VisitContext::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://example.com"));
        assert_eq!(harness.metrics.redirects(), 1);
        assert_eq!(harness.visits.try_recv().unwrap().short_code, "aB3dE9z");
    }

    #[tokio::test]
    async fn test_resolve_cache_miss_fills_cache() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_url()
            .withf(|code| code == "aB3dE9z")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let cache = moka();
        let (service, _harness) = service(mock_repo, cache.clone());

        let url = service
            .resolve("aB3dE9z", VisitContext::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://example.com"));
        let cached = cache.get_url("aB3dE9z").await.unwrap();
        assert_eq!(cached.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_resolve_cache_error_degrades_to_database() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_url()
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let mut mock_cache = MockCacheService::new();
        mock_cache
            .expect_get_url()
            .times(1)
            .returning(|_| Err(CacheError::ConnectionError("refused".to_string())));
        mock_cache
            .expect_set_url()
            .times(1)
            .returning(|_, _| Err(CacheError::ConnectionError("refused".to_string())));

        let (service, harness) = service(mock_repo, Arc::new(mock_cache));

        let url = service
            .resolve("aB3dE9z", VisitContext::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://example.com"));
        assert_eq!(harness.metrics.redirects(), 1);
        assert_eq!(harness.metrics.failed_redirects(), 0);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_url().times(1).returning(|_| Ok(None));

        let (service, mut harness) = service(mock_repo, Arc::new(NullCache::new()));

        let url = service
            .resolve("zZ9yY8x", VisitContext::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(url.is_none());
        assert_eq!(harness.metrics.failed_redirects(), 1);
        assert_eq!(harness.metrics.redirects(), 0);
        assert!(harness.visits.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_lookups() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_url().times(0);

        let mut mock_cache = MockCacheService::new();
        mock_cache.expect_get_url().times(0);
        mock_cache.expect_set_url().times(0);

        let (service, mut harness) = service(mock_repo, Arc::new(mock_cache));

        for code in ["\0abcde", "short", "toolong12", "ab-cd_e", "nonexistent"] {
            let url = service
                .resolve(code, VisitContext::default(), &CancellationToken::new())
                .await
                .unwrap();
            assert!(url.is_none());
        }

        assert_eq!(harness.metrics.failed_redirects(), 5);
        assert_eq!(harness.metrics.redirects(), 0);
        assert!(harness.visits.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_enqueues_single_visit_with_context() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_url()
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let (service, mut harness) = service(mock_repo, Arc::new(NullCache::new()));

        service
            .resolve(
                "aB3dE9z",
                VisitContext::new(Some("Mozilla/5.0"), Some("https://google.com")),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let event = harness.visits.try_recv().unwrap();
        assert_eq!(event.short_code, "aB3dE9z");
        assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(event.referer.as_deref(), Some("https://google.com"));
        assert!(harness.visits.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_succeeds_when_visit_queue_is_closed() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_url()
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let (service, harness) = service(mock_repo, Arc::new(NullCache::new()));
        let metrics = harness.metrics.clone();
        drop(harness);

        let url = service
            .resolve("aB3dE9z", VisitContext::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://example.com"));
        assert_eq!(metrics.redirects(), 1);
        assert_eq!(metrics.failed_redirects(), 0);
    }

    #[tokio::test]
    async fn test_resolve_propagates_database_error() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_url()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let (service, harness) = service(mock_repo, Arc::new(NullCache::new()));

        let result = service
            .resolve("aB3dE9z", VisitContext::default(), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
        assert_eq!(harness.metrics.redirects(), 0);
        assert_eq!(harness.metrics.failed_redirects(), 0);
    }

    #[tokio::test]
    async fn test_resolve_honors_cancellation() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_url().times(0);

        let (service, harness) = service(mock_repo, Arc::new(NullCache::new()));

        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = service
            .resolve("aB3dE9z", VisitContext::default(), &cancel)
            .await;

        assert!(matches!(result, Err(AppError::Cancelled { .. })));
        assert_eq!(harness.metrics.failed_redirects(), 0);
    }
}
