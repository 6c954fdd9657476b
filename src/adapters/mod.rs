//! Adapters layer
//!
//! In-process caches that sit between the services and slow external reads.

pub mod cache;
