//! Domain errors for the Foreman log core.

use thiserror::Error;

/// Domain-level errors surfaced by the service layer.
///
/// The caches, the mutex and the extractors never fail; these cover the
/// collaborators around them.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Pod not found: {0}")]
    PodNotFound(String),

    #[error("Log source error: {0}")]
    LogSource(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
