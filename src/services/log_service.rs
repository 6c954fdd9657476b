//! Pod log access for the dashboard.
//!
//! Composes the caches, the fetch lock and the extractors the way every
//! request needs them: resolve the pod's phase (cached), fetch the log text
//! (cached, single-flight), then derive prettified text or progress from it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, Instrument};

use crate::adapters::cache::{Cache, CacheKey, ReclaimableCache, RetainingCache};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CacheConfig, PodPhase, PodRef, ProgressItem};
use crate::domain::ports::LogSource;
use crate::infrastructure::sync::FifoMutex;
use crate::services::prettify::prettify_logs_async;
use crate::services::progress::{extract_progress, ProgressOptions};

/// Cached, single-flight access to pod logs and what can be derived from them.
pub struct LogService<S: LogSource> {
    source: Arc<S>,
    phases: RetainingCache<PodPhase>,
    logs: ReclaimableCache<String>,
    pretty: ReclaimableCache<String>,
    fetch_lock: FifoMutex,
    progress_options: ProgressOptions,
}

impl<S: LogSource + 'static> LogService<S> {
    /// Build the service with caches sized from configuration.
    pub fn new(source: Arc<S>, config: &CacheConfig, progress_options: ProgressOptions) -> Self {
        let logs_ttl = Duration::from_millis(config.logs_ttl_ms);
        Self {
            source,
            phases: RetainingCache::new(Duration::from_millis(config.descriptor_ttl_ms)),
            logs: ReclaimableCache::new(logs_ttl, config.logs_max_bytes),
            pretty: ReclaimableCache::new(logs_ttl, config.logs_max_bytes),
            fetch_lock: FifoMutex::new(),
            progress_options,
        }
    }

    /// Raw log text of `pod`.
    ///
    /// `None` when the pod does not exist or has not produced logs yet.
    ///
    /// Fetches for all pods queue on one lock, so a slow fetch delays the
    /// others. Once a fetch has started it runs to completion and fills the
    /// cache even if this future is dropped.
    #[instrument(skip(self, pod), fields(pod = %pod))]
    pub async fn get_logs(&self, pod: &PodRef) -> DomainResult<Option<Arc<String>>> {
        match self.pod_phase(pod).await? {
            None => {
                debug!("pod not found");
                return Ok(None);
            }
            Some(phase) if !phase.has_logs() => {
                debug!(?phase, "pod has no logs yet");
                return Ok(None);
            }
            Some(_) => {}
        }

        let key = cache_key(pod);
        if let Some(logs) = self.logs.lookup(&key) {
            return Ok(Some(logs));
        }

        // Waiters queued behind the first fetch find its result in the cache.
        let release = self.fetch_lock.lock().await;
        let source = Arc::clone(&self.source);
        let logs = self.logs.clone();
        let pod = pod.clone();
        let fetch = tokio::spawn(
            async move {
                let result = logs
                    .try_lazy_compute(key, || async {
                        let text = source.fetch_logs(&pod).await?;
                        debug!(bytes = text.len(), "fetched pod logs");
                        Ok::<_, DomainError>(Some(text))
                    })
                    .await;
                release.release();
                result
            }
            .instrument(tracing::Span::current()),
        );
        fetch
            .await
            .map_err(|err| DomainError::LogSource(format!("log fetch task failed: {err}")))?
    }

    /// Prettified log text of `pod`.
    #[instrument(skip(self, pod), fields(pod = %pod))]
    pub async fn get_pretty_logs(&self, pod: &PodRef) -> DomainResult<Option<Arc<String>>> {
        let Some(logs) = self.get_logs(pod).await? else {
            return Ok(None);
        };
        let pretty = self
            .pretty
            .lazy_compute(cache_key(pod), || async { Some(prettify_logs_async(&logs).await) })
            .await;
        Ok(pretty)
    }

    /// Repository progress of the run in `pod`.
    ///
    /// `None` when logs are unavailable or contain no discovery record yet.
    #[instrument(skip(self, pod), fields(pod = %pod))]
    pub async fn get_progress(&self, pod: &PodRef) -> DomainResult<Option<Vec<ProgressItem>>> {
        let Some(logs) = self.get_logs(pod).await? else {
            return Ok(None);
        };
        let progress = extract_progress(&logs, &self.progress_options);
        if progress.is_none() {
            debug!("no discovery record in logs");
        }
        Ok(progress)
    }

    /// Forget everything cached about `pod`.
    pub fn invalidate(&self, pod: &PodRef) {
        let key = cache_key(pod);
        self.phases.invalidate(&key);
        self.logs.invalidate(&key);
        self.pretty.invalidate(&key);
    }

    /// Drop all cached log text, raw and prettified.
    pub fn reclaim_logs(&self) -> usize {
        self.logs.reclaim_all() + self.pretty.reclaim_all()
    }

    async fn pod_phase(&self, pod: &PodRef) -> DomainResult<Option<PodPhase>> {
        self.phases
            .try_lazy_compute(cache_key(pod), || self.source.pod_phase(pod))
            .await
    }
}

fn cache_key(pod: &PodRef) -> CacheKey {
    CacheKey::new([pod.namespace.as_str(), pod.name.as_str()])
}
