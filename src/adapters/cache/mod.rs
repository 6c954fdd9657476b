//! In-memory TTL caching for controller hot paths.
//!
//! Both variants are thin layers over moka with a per-entry time to live:
//! - [`RetainingCache`] keeps every value alive for the full TTL. Use it for
//!   small, frequently reused values such as resource descriptors.
//! - [`ReclaimableCache`] hands out `Arc` handles and reclaims entries under a
//!   byte budget, so large payloads (full log text) never pin memory for the
//!   whole TTL.
//!
//! Neither cache coalesces concurrent computations for the same key: two
//! racing [`Cache::lazy_compute`] calls both run their compute and the last
//! store wins. Call sites that need single-flight semantics serialize with a
//! [`FifoMutex`](crate::infrastructure::sync::FifoMutex).

mod key;
mod reclaimable;
mod retaining;

use std::future::Future;

pub use key::CacheKey;
pub use reclaimable::{ReclaimableCache, Weigh};
pub use retaining::RetainingCache;

/// Time-bounded memoization keyed by [`CacheKey`].
///
/// None of the operations suspend; only the compute future passed to
/// [`lazy_compute`](Cache::lazy_compute) does.
pub trait Cache: Send + Sync {
    /// Type accepted by [`store`](Cache::store) and produced by computations.
    type Value: Send;
    /// Type handed back by lookups.
    type Handle: Send;

    /// Insert or replace the entry for `key`, stamping the current time.
    ///
    /// Returns the handle a subsequent lookup would yield.
    fn store(&self, key: CacheKey, value: Self::Value) -> Self::Handle;

    /// Return the value for `key` if present and unexpired. Expired entries
    /// encountered along the way are purged.
    fn lookup(&self, key: &CacheKey) -> Option<Self::Handle>;

    /// Remove the entry for `key`; no-op if absent.
    fn invalidate(&self, key: &CacheKey);

    /// Return the cached value, or run `compute` and cache its result.
    ///
    /// A `None` result is never cached, so a transient not-found does not
    /// stick for the whole TTL.
    fn lazy_compute<F, Fut>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> impl Future<Output = Option<Self::Handle>> + Send
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Option<Self::Value>> + Send,
    {
        async move {
            if let Some(cached) = self.lookup(&key) {
                tracing::trace!(%key, "cache hit");
                return Some(cached);
            }
            tracing::trace!(%key, "cache miss, computing");
            let value = compute().await?;
            Some(self.store(key, value))
        }
    }

    /// Fallible variant of [`lazy_compute`](Cache::lazy_compute).
    ///
    /// Errors propagate to the caller and nothing is cached.
    fn try_lazy_compute<F, Fut, E>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> impl Future<Output = Result<Option<Self::Handle>, E>> + Send
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Option<Self::Value>, E>> + Send,
        E: Send,
    {
        async move {
            if let Some(cached) = self.lookup(&key) {
                tracing::trace!(%key, "cache hit");
                return Ok(Some(cached));
            }
            tracing::trace!(%key, "cache miss, computing");
            Ok(compute().await?.map(|value| self.store(key, value)))
        }
    }
}
