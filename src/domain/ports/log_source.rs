//! Log source port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{PodPhase, PodRef};

/// Read access to the pods of the Renovate job and their logs.
///
/// Implemented by the orchestration client; every call is assumed to be
/// expensive, which is why the service layer caches the results.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Current phase of the pod, or `None` if no such pod belongs to the job.
    async fn pod_phase(&self, pod: &PodRef) -> DomainResult<Option<PodPhase>>;

    /// Full log text of the pod's main container.
    async fn fetch_logs(&self, pod: &PodRef) -> DomainResult<String>;
}
