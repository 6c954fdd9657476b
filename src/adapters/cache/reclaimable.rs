//! Cache for large payloads that may be reclaimed before they expire.
//!
//! Entries are held as `Arc<T>` and weighed in bytes. Whenever a store pushes
//! the total weight over the configured budget, least-recently-used entries are
//! reclaimed until it fits again. [`ReclaimableCache::reclaim_all`] drops every
//! entry at once for callers reacting to memory pressure.
//!
//! A reclaimed entry is indistinguishable from an expired one: lookups report
//! absent. Handles already given out stay valid, since they are shared.

use std::sync::Arc;
use std::time::Duration;

use moka::policy::EvictionPolicy;

use super::{Cache, CacheKey};

/// Approximate heap footprint of a cached value, in bytes.
pub trait Weigh {
    fn weigh(&self) -> usize;
}

impl Weigh for String {
    fn weigh(&self) -> usize {
        self.len()
    }
}

/// TTL cache bounded by a byte budget, backed by moka.
///
/// Clones share the same entries.
pub struct ReclaimableCache<T> {
    max_bytes: usize,
    entries: moka::sync::Cache<CacheKey, Arc<T>>,
}

impl<T> Clone for ReclaimableCache<T> {
    fn clone(&self) -> Self {
        Self {
            max_bytes: self.max_bytes,
            entries: self.entries.clone(),
        }
    }
}

impl<T: Weigh + Send + Sync + 'static> ReclaimableCache<T> {
    /// Create an empty cache whose entries expire `ttl` after they were stored
    /// and whose total weight never exceeds `max_bytes` after a store completes.
    ///
    /// # Panics
    ///
    /// Panics if `ttl` is zero.
    pub fn new(ttl: Duration, max_bytes: usize) -> Self {
        assert!(!ttl.is_zero(), "cache TTL must be non-zero");
        let entries = moka::sync::Cache::builder()
            .weigher(|_key: &CacheKey, value: &Arc<T>| {
                u32::try_from(value.weigh()).unwrap_or(u32::MAX)
            })
            .max_capacity(u64::try_from(max_bytes).unwrap_or(u64::MAX))
            .eviction_policy(EvictionPolicy::lru())
            .time_to_live(ttl)
            .build();
        Self { max_bytes, entries }
    }

    /// Total weight of the live entries.
    pub fn weight(&self) -> usize {
        self.entries.run_pending_tasks();
        usize::try_from(self.entries.weighted_size()).unwrap_or(usize::MAX)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        usize::try_from(self.entries.entry_count()).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry regardless of age. Returns how many were reclaimed.
    pub fn reclaim_all(&self) -> usize {
        let reclaimed = self.len();
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
        if reclaimed > 0 {
            tracing::debug!(reclaimed, "reclaimed all cache entries");
        }
        reclaimed
    }
}

impl<T: Weigh + Send + Sync + 'static> Cache for ReclaimableCache<T> {
    type Value = T;
    type Handle = Arc<T>;

    fn store(&self, key: CacheKey, value: T) -> Arc<T> {
        let weight = value.weigh();
        let value = Arc::new(value);

        if weight > self.max_bytes {
            // Handed back to the caller, never retained.
            self.entries.invalidate(&key);
            tracing::debug!(%key, weight, max_bytes = self.max_bytes, "value exceeds cache budget, not retained");
            return value;
        }

        tracing::trace!(%key, weight, "storing cache entry");
        self.entries.insert(key, Arc::clone(&value));
        // Apply the budget now rather than on moka's next maintenance cycle.
        self.entries.run_pending_tasks();
        value
    }

    fn lookup(&self, key: &CacheKey) -> Option<Arc<T>> {
        self.entries.get(key)
    }

    fn invalidate(&self, key: &CacheKey) {
        if self.entries.remove(key).is_some() {
            tracing::debug!(%key, "invalidated cache entry");
        }
    }
}
