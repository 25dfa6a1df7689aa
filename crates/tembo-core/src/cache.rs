//! Query cache for read views.
//!
//! Entries are considered fresh for a configurable window (30 minutes by
//! default) and are evicted entirely after a longer one (35 minutes). A fresh
//! entry is served without a request; a stale or missing one is reloaded.
//! Mutations invalidate the keys they affect once they settle.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;

use crate::error::ApiError;

/// Identity of a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Itineraries,
    Itinerary(String),
    Blogs,
    Blog(String),
    Bookings { page: u32, page_size: u32 },
    Staff,
    StaffProfile,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Itineraries => write!(f, "[\"itineraries\"]"),
            QueryKey::Itinerary(id) => write!(f, "[\"itinerary\", \"{id}\"]"),
            QueryKey::Blogs => write!(f, "[\"blogs\"]"),
            QueryKey::Blog(id) => write!(f, "[\"blog\", \"{id}\"]"),
            QueryKey::Bookings { page, page_size } => {
                write!(f, "[\"bookings\", {page}, {page_size}]")
            }
            QueryKey::Staff => write!(f, "[\"staff\"]"),
            QueryKey::StaffProfile => write!(f, "[\"staff-profile\"]"),
        }
    }
}

#[derive(Clone)]
struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
}

/// Shared, cheaply clonable cache of fetched query results.
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<QueryKey, Entry>,
    stale_after: Duration,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.inner.entry_count())
            .field("stale_after", &self.stale_after)
            .finish()
    }
}

impl QueryCache {
    /// Create a cache whose entries go stale after `stale_after` and are
    /// dropped after `evict_after`.
    pub fn new(max_entries: u64, stale_after: Duration, evict_after: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(evict_after.max(stale_after))
                .build(),
            stale_after,
        }
    }

    /// Serve a fresh cached value, or run `loader` and cache its result.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; nothing is cached in that case.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(value) = self.fresh::<T>(&key).await {
            log::debug!("Cache hit for {key}");
            return Ok(value);
        }
        self.load(key, loader).await
    }

    /// Run `loader` regardless of freshness and cache its result.
    pub async fn refresh<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.load(key, loader).await
    }

    /// Cached value regardless of freshness, without loading.
    pub async fn peek<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entry = self.inner.get(key).await?;
        entry.value.downcast::<T>().ok()
    }

    pub async fn invalidate(&self, key: &QueryKey) {
        log::debug!("Invalidating {key}");
        self.inner.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    async fn fresh<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entry = self.inner.get(key).await?;
        if entry.fetched_at.elapsed() >= self.stale_after {
            return None;
        }
        entry.value.downcast::<T>().ok()
    }

    async fn load<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        log::debug!("Loading {key}");
        let value = match loader().await {
            Ok(value) => Arc::new(value),
            Err(e) => {
                log::warn!("Fetching {key} failed: {e}");
                return Err(e);
            }
        };
        let entry = Entry {
            value: value.clone(),
            fetched_at: Instant::now(),
        };
        self.inner.insert(key, entry).await;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn cache(stale: Duration) -> QueryCache {
        QueryCache::new(100, stale, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_fresh_entry_skips_loader() {
        let cache = cache(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .fetch(QueryKey::Itineraries, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApiError>(vec!["Mara".to_string()])
                })
                .await
                .unwrap();
            assert_eq!(value.len(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_ignores_fresh_entry() {
        let cache = cache(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let loader = || async {
            Ok::<_, ApiError>(calls.fetch_add(1, Ordering::SeqCst))
        };

        cache.fetch(QueryKey::Staff, loader).await.unwrap();
        let reloaded = cache.refresh(QueryKey::Staff, loader).await.unwrap();
        let cached = cache.fetch(QueryKey::Staff, loader).await.unwrap();

        assert_eq!(*reloaded, 1);
        assert_eq!(*cached, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_entry_reloads() {
        let cache = cache(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .fetch(QueryKey::Blogs, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApiError>(0u32)
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let cache = cache(Duration::from_secs(60));
        let key = QueryKey::Itinerary("it-1".to_string());

        cache
            .fetch(key.clone(), || async { Ok::<_, ApiError>(1u32) })
            .await
            .unwrap();
        cache.invalidate(&key).await;
        assert!(cache.peek::<u32>(&key).await.is_none());

        let value = cache
            .fetch(key.clone(), || async { Ok::<_, ApiError>(2u32) })
            .await
            .unwrap();
        assert_eq!(*value, 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = cache(Duration::from_secs(60));
        let result = cache
            .fetch(QueryKey::Staff, || async {
                Err::<u32, _>(ApiError::Network("offline".to_string()))
            })
            .await;
        assert!(result.is_err());
        assert!(cache.peek::<u32>(&QueryKey::Staff).await.is_none());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(
            QueryKey::Itinerary("7".to_string()).to_string(),
            "[\"itinerary\", \"7\"]"
        );
    }
}
