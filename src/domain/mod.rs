//! Domain layer for Foreman
//!
//! This module contains the data model and the ports to external systems.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
