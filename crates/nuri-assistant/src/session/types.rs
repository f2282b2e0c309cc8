//! Session concurrency guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::AssistantError;

/// Guard that clears the shared `busy` flag on drop, ensuring it is always
/// released even if the future is cancelled or an early return occurs. Owns
/// its own handle to the flag so the session stays mutably borrowable while
/// an exchange holds the guard.
pub(crate) struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    /// Attempt to acquire the busy lock. Returns `Err` if an exchange is
    /// already in flight.
    pub(crate) fn acquire(flag: Arc<AtomicBool>) -> Result<Self, AssistantError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(AssistantError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
