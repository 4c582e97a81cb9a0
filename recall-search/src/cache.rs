//! In-memory cache of ranked suggestions.
//!
//! Keyed by the (normalised query, result limit) pair. Uses [`moka`] for
//! async-friendly caching with a TTL and automatic eviction. The cache is
//! owned by the service that creates it; there is no process-wide instance.

use std::time::Duration;

use moka::future::Cache;

use crate::types::Suggestion;

/// Composite cache key: normalised query + requested result count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed query string.
    query: String,
    limit: usize,
}

impl CacheKey {
    /// Build a deterministic cache key. The query is lowercased and trimmed.
    pub fn new(query: &str, limit: usize) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            limit,
        }
    }
}

/// Query → suggestions cache. A zero TTL disables it entirely.
#[derive(Debug, Clone)]
pub struct QueryCache {
    inner: Option<Cache<CacheKey, Vec<Suggestion>>>,
}

impl QueryCache {
    /// Create a cache holding at most `capacity` queries for `ttl_seconds`.
    pub fn new(capacity: u64, ttl_seconds: u64) -> Self {
        let inner = (ttl_seconds > 0 && capacity > 0).then(|| {
            Cache::builder()
                .max_capacity(capacity)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Look up cached suggestions. Returns `None` on miss or when disabled.
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<Suggestion>> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Store suggestions. No-op when disabled.
    pub async fn insert(&self, key: CacheKey, suggestions: Vec<Suggestion>) {
        if let Some(cache) = &self.inner {
            cache.insert(key, suggestions).await;
        }
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        if let Some(cache) = &self.inner {
            cache.invalidate_all();
        }
    }
}
