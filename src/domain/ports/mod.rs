//! Port trait definitions (Hexagonal Architecture)
//!
//! - LogSource: pod phases and log text from the orchestration client
//!
//! These traits let the service layer stay independent of the cluster API.

pub mod log_source;

pub use log_source::LogSource;
