//! Async synchronization primitives.

pub mod fifo_mutex;

pub use fifo_mutex::{FifoMutex, MutexRelease};
