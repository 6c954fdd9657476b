//! Infrastructure layer module
//!
//! This module contains the process-level plumbing:
//! - Configuration management
//! - Logging infrastructure
//! - Async synchronization primitives

pub mod config;
pub mod logging;
pub mod sync;
