//! Foreman - Renovate job dashboard core
//!
//! Foreman serves the logs of Renovate jobs running in a cluster and derives
//! per-repository progress from them, without hammering the orchestration API.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure data model and ports
//! - **Adapters Layer** (`adapters`): TTL caches in front of slow reads
//! - **Service Layer** (`services`): Progress extraction, prettifying, log access
//! - **Infrastructure Layer** (`infrastructure`): Config, logging, async primitives
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use foreman::services::{extract_progress, ProgressOptions};
//!
//! let logs = concat!(
//!     r#"{"repositories":["foo/bar"],"msg":"Autodiscovered repositories"}"#, "\n",
//!     r#"{"repository":"foo/bar","msg":"Repository finished"}"#,
//! );
//! let progress = extract_progress(logs, &ProgressOptions::default()).unwrap();
//! assert_eq!(progress[0].state.as_str(), "finished");
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::cache::{Cache, CacheKey, ReclaimableCache, RetainingCache, Weigh};
pub use domain::models::{
    CacheConfig, Config, LoggingConfig, PodPhase, PodRef, ProgressConfig, ProgressItem,
    ProgressState,
};
pub use domain::ports::LogSource;
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::sync::{FifoMutex, MutexRelease};
pub use services::{extract_progress, prettify_logs, LogService, ProgressExtractor, ProgressOptions};
