use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::SupervisorError;

/// Write-once holder for the run's error, shared by every supervision loop.
#[derive(Debug, Default)]
pub(crate) struct ErrorSlot {
    inner: Mutex<Option<SupervisorError>>,
}

impl ErrorSlot {
    /// Stores `err` unless a value is already present. Returns whether it was kept.
    pub(crate) fn offer(&self, err: SupervisorError) -> bool {
        let mut slot = self.lock();
        if slot.is_some() {
            return false;
        }
        *slot = Some(err);
        true
    }

    pub(crate) fn take(&self) -> Option<SupervisorError> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<SupervisorError>> {
        // Nothing panics while holding the lock, the value is always coherent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
