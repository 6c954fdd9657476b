//! Cache that keeps values alive for the full TTL.

use std::time::Duration;

use super::{Cache, CacheKey};

/// TTL cache storing values directly, backed by moka.
///
/// Lookups clone the stored value, so `T` should be cheap to clone or wrapped
/// in an `Arc` by the caller. There is no capacity bound.
pub struct RetainingCache<T> {
    ttl: Duration,
    entries: moka::sync::Cache<CacheKey, T>,
}

impl<T: Clone + Send + Sync + 'static> RetainingCache<T> {
    /// Create an empty cache whose entries expire `ttl` after they were stored.
    ///
    /// # Panics
    ///
    /// Panics if `ttl` is zero.
    pub fn new(ttl: Duration) -> Self {
        assert!(!ttl.is_zero(), "cache TTL must be non-zero");
        Self {
            ttl,
            entries: moka::sync::Cache::builder().time_to_live(ttl).build(),
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        usize::try_from(self.entries.entry_count()).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync + 'static> Cache for RetainingCache<T> {
    type Value = T;
    type Handle = T;

    fn store(&self, key: CacheKey, value: T) -> T {
        tracing::trace!(%key, "storing cache entry");
        self.entries.insert(key, value.clone());
        value
    }

    fn lookup(&self, key: &CacheKey) -> Option<T> {
        self.entries.get(key)
    }

    fn invalidate(&self, key: &CacheKey) {
        if self.entries.remove(key).is_some() {
            tracing::debug!(%key, "invalidated cache entry");
        }
    }
}
