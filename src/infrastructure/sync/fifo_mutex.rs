//! FIFO-fair async mutex guarding no data.
//!
//! Used to serialize expensive work (a log fetch, a hash computation) so that
//! concurrent identical requests don't all pay for it. There is no timeout:
//! a holder that never releases blocks every later waiter, so callers bound
//! their critical sections themselves.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Mutual exclusion with waiters served in the order they queued.
///
/// Backed by a tokio mutex, which is fair: the lock is handed to waiters in
/// the order their `lock()` futures were first polled. Cloning yields another
/// handle to the same lock.
#[derive(Clone, Default)]
pub struct FifoMutex {
    inner: Arc<Mutex<()>>,
}

/// Capability to release a held [`FifoMutex`].
///
/// Release happens exactly once, either through [`release`](Self::release)
/// or when the capability is dropped.
#[derive(Debug)]
#[must_use = "the lock is released as soon as this is dropped"]
pub struct MutexRelease {
    _guard: OwnedMutexGuard<()>,
}

impl FifoMutex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until the lock is free, then take it.
    pub async fn lock(&self) -> MutexRelease {
        let guard = Arc::clone(&self.inner).lock_owned().await;
        tracing::trace!("mutex acquired");
        MutexRelease { _guard: guard }
    }

    /// Whether some holder currently owns the lock.
    pub fn is_locked(&self) -> bool {
        self.inner.try_lock().is_err()
    }
}

impl MutexRelease {
    /// Free the lock, handing it to the next waiter if any.
    pub fn release(self) {
        drop(self);
        tracing::trace!("mutex released");
    }
}
