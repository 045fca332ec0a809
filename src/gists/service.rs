//! Gist Service
//!
//! Read-through orchestration: derive the page key, serve from the cache when
//! allowed, otherwise fetch upstream, normalize, and refresh the cache.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{ProxyError, Result};
use crate::gists::{
    CachedPage, Gist, GistSource, PageKey, PageRequest, PageResult, Pagination, UpstreamFailure,
};

/// Cache shared between the service, the API and the cleanup task.
pub type SharedPageCache = Arc<RwLock<CacheStore<CachedPage>>>;

// == Gist Service ==
/// Fetches pages of gists through a shared TTL cache.
///
/// Holds no per-request state; everything shared lives in the cache. Two
/// concurrent misses for the same page both go upstream and the later write
/// wins.
#[derive(Clone)]
pub struct GistService {
    cache: SharedPageCache,
    source: Arc<dyn GistSource>,
}

impl GistService {
    /// Creates a service over an injected cache and upstream source.
    pub fn new(cache: SharedPageCache, source: Arc<dyn GistSource>) -> Self {
        Self { cache, source }
    }

    /// Handle to the underlying cache, e.g. for the cleanup task.
    pub fn cache(&self) -> SharedPageCache {
        self.cache.clone()
    }

    // == Fetch Page ==
    /// Returns one page of `request.owner()`'s gists.
    ///
    /// With `use_cache` unset the cache is not read, but the fresh page is
    /// still written so later callers benefit from it.
    pub async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult> {
        let key = PageKey::new(request.owner(), request.page(), request.per_page()).to_string();

        if request.use_cache() {
            // Lookups bump counters, so they need the write lock.
            let cached = self.cache.write().await.get(&key);
            if let Some(page) = cached {
                debug!("Cache hit for {}", key);
                return Ok(PageResult::from_cache(page));
            }
            debug!("Cache miss for {}", key);
        } else {
            debug!("Cache bypassed for {}", key);
        }

        info!("Fetching gists for: {}", request.owner());
        let upstream = self
            .source
            .fetch_gists(request.owner(), request.page(), request.per_page())
            .await
            .map_err(|failure| map_upstream_failure(request.owner(), failure))?;

        let items: Vec<Gist> = upstream.items.into_iter().map(Gist::from).collect();
        let pagination = Pagination {
            page: request.page(),
            per_page: request.per_page(),
            count: items.len(),
            has_next: upstream.has_next,
            has_prev: upstream.has_prev,
        };
        info!("Found {} gists for {}", items.len(), request.owner());

        let page = CachedPage { items, pagination };
        self.cache.write().await.set(key, page.clone(), None);

        Ok(PageResult::fresh(page))
    }

    // == Cache Administration ==
    /// Current cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// TTL applied to newly cached pages, in seconds.
    pub async fn cache_ttl(&self) -> u64 {
        self.cache.read().await.default_ttl()
    }

    /// Drops every cached page and resets the counters.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        info!("Cache cleared");
    }
}

/// Translates an upstream failure into the error surfaced to callers.
fn map_upstream_failure(owner: &str, failure: UpstreamFailure) -> ProxyError {
    match failure {
        UpstreamFailure::NotFound => {
            warn!("User not found: {}", owner);
            ProxyError::NotFound(owner.to_string())
        }
        UpstreamFailure::RateLimited => {
            error!("GitHub API rate limit exceeded");
            ProxyError::RateLimited
        }
        UpstreamFailure::Timeout => {
            error!("Timeout fetching gists for {}", owner);
            ProxyError::UpstreamTimeout
        }
        UpstreamFailure::Status(code) => {
            error!("GitHub returned status {} for {}", code, owner);
            ProxyError::UpstreamStatus(code)
        }
        UpstreamFailure::Other(detail) => {
            error!("Error fetching gists for {}: {}", owner, detail);
            ProxyError::Internal(detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::gists::testing::StubSource;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    const TTL: u64 = 300;

    fn service_with(source: Arc<StubSource>) -> (GistService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let cache = Arc::new(RwLock::new(CacheStore::with_clock(TTL, clock.clone())));
        (GistService::new(cache, source), clock)
    }

    #[tokio::test]
    async fn test_cold_cache_fetches_upstream() {
        let source = Arc::new(StubSource::with_items(3, true, false));
        let (service, _) = service_with(source.clone());

        let result = assert_ok!(service.fetch_page(&PageRequest::new("octocat", 1, 30)).await);

        assert!(!result.cache_hit);
        assert_eq!(result.items.len(), 3);
        assert_eq!(
            result.pagination,
            Pagination {
                page: 1,
                per_page: 30,
                count: 3,
                has_next: true,
                has_prev: false,
            }
        );
        assert_eq!(source.calls(), 1);
        assert_eq!(source.last_call(), Some(("octocat".to_string(), 1, 30)));
    }

    #[tokio::test]
    async fn test_repeat_call_is_a_hit() {
        let source = Arc::new(StubSource::with_items(2, false, false));
        let (service, _) = service_with(source.clone());
        let request = PageRequest::new("octocat", 1, 30);

        let first = service.fetch_page(&request).await.unwrap();
        let second = service.fetch_page(&request).await.unwrap();

        assert!(second.cache_hit);
        assert_eq!(second.items, first.items);
        assert_eq!(second.pagination, first.pagination);
        assert_eq!(source.calls(), 1);

        let stats = service.cache_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_repeated_hits_are_identical() {
        let source = Arc::new(StubSource::with_items(4, true, true));
        let (service, _) = service_with(source.clone());
        let request = PageRequest::new("octocat", 2, 4);

        service.fetch_page(&request).await.unwrap();
        let a = service.fetch_page(&request).await.unwrap();
        let b = service.fetch_page(&request).await.unwrap();

        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_vec(&a.items).unwrap(),
            serde_json::to_vec(&b.items).unwrap()
        );
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_distinct_coordinates_use_distinct_slots() {
        let source = Arc::new(StubSource::with_items(1, false, false));
        let (service, _) = service_with(source.clone());

        service.fetch_page(&PageRequest::new("octocat", 1, 30)).await.unwrap();
        service.fetch_page(&PageRequest::new("octocat", 2, 30)).await.unwrap();
        service.fetch_page(&PageRequest::new("octocat", 1, 10)).await.unwrap();
        service.fetch_page(&PageRequest::new("torvalds", 1, 30)).await.unwrap();

        assert_eq!(source.calls(), 4);
        assert_eq!(service.cache_stats().await.size, 4);
    }

    #[tokio::test]
    async fn test_bypass_skips_read_but_refreshes_cache() {
        let source = Arc::new(StubSource::with_items(2, true, false));
        let (service, _) = service_with(source.clone());
        let request = PageRequest::new("octocat", 1, 2);

        service.fetch_page(&request).await.unwrap();

        source.set_items(5, false, false);
        let bypass = service.fetch_page(&request.clone().with_cache(false)).await.unwrap();
        assert!(!bypass.cache_hit);
        assert_eq!(bypass.pagination.count, 5);
        assert_eq!(source.calls(), 2);

        let cached = service.fetch_page(&request).await.unwrap();
        assert!(cached.cache_hit);
        assert_eq!(cached.pagination, bypass.pagination);
        assert_eq!(cached.items, bypass.items);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_bypass_does_not_count_a_miss() {
        let source = Arc::new(StubSource::with_items(1, false, false));
        let (service, _) = service_with(source);

        service
            .fetch_page(&PageRequest::new("octocat", 1, 30).with_cache(false))
            .await
            .unwrap();

        let stats = service.cache_stats().await;
        assert_eq!(stats.hits + stats.misses, 0);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_expired_page_is_refetched() {
        let source = Arc::new(StubSource::with_items(1, false, false));
        let (service, clock) = service_with(source.clone());
        let request = PageRequest::first_page("octocat");

        service.fetch_page(&request).await.unwrap();
        clock.advance(Duration::from_secs(TTL - 1));
        assert!(service.fetch_page(&request).await.unwrap().cache_hit);

        clock.advance(Duration::from_secs(1));
        assert!(!service.fetch_page(&request).await.unwrap().cache_hit);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_not_found_names_owner() {
        let source = Arc::new(StubSource::failing(UpstreamFailure::NotFound));
        let (service, _) = service_with(source);

        let err = assert_err!(
            service
                .fetch_page(&PageRequest::first_page("no-such-owner-xyz"))
                .await
        );
        assert!(matches!(&err, ProxyError::NotFound(owner) if owner == "no-such-owner-xyz"));
        assert!(err.to_string().contains("no-such-owner-xyz"));
    }

    #[tokio::test]
    async fn test_failure_mapping() {
        let cases = [
            (UpstreamFailure::RateLimited, 429),
            (UpstreamFailure::Timeout, 504),
            (UpstreamFailure::Status(502), 502),
            (UpstreamFailure::Other("bad json".into()), 500),
        ];

        for (failure, status) in cases {
            let source = Arc::new(StubSource::failing(failure));
            let (service, _) = service_with(source);

            let err = service
                .fetch_page(&PageRequest::first_page("octocat"))
                .await
                .unwrap_err();
            assert_eq!(err.status_code().as_u16(), status);
        }
    }

    #[tokio::test]
    async fn test_failures_are_not_cached_or_retried() {
        let source = Arc::new(StubSource::failing(UpstreamFailure::Timeout));
        let (service, _) = service_with(source.clone());
        let request = PageRequest::first_page("octocat");

        assert!(service.fetch_page(&request).await.is_err());
        assert_eq!(source.calls(), 1);
        assert_eq!(service.cache_stats().await.size, 0);

        source.set_items(1, false, false);
        let result = service.fetch_page(&request).await.unwrap();
        assert!(!result.cache_hit);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_resets_and_next_call_misses() {
        let source = Arc::new(StubSource::with_items(1, false, false));
        let (service, _) = service_with(source.clone());
        let request = PageRequest::first_page("octocat");

        service.fetch_page(&request).await.unwrap();
        service.fetch_page(&request).await.unwrap();

        service.clear_cache().await;
        let stats = service.cache_stats().await;
        assert_eq!(stats, CacheStats::new());
        assert_eq!(stats.hit_rate(), 0.0);

        assert!(!service.fetch_page(&request).await.unwrap().cache_hit);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_both_succeed() {
        let source = Arc::new(
            StubSource::with_items(2, false, false).with_delay(Duration::from_millis(50)),
        );
        let (service, _) = service_with(source.clone());
        let request = PageRequest::first_page("octocat");

        let (a, b) = tokio::join!(service.fetch_page(&request), service.fetch_page(&request));

        assert!(!a.unwrap().cache_hit);
        assert!(!b.unwrap().cache_hit);
        assert_eq!(source.calls(), 2);

        let stats = service.cache_stats().await;
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_cache_ttl_reports_default() {
        let (service, _) = service_with(Arc::new(StubSource::with_items(0, false, false)));
        assert_eq!(service.cache_ttl().await, TTL);
    }
}
