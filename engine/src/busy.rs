//! Single-slot re-entrancy guard.
//!
//! A sync request that arrives while another is in flight is dropped, not
//! queued. The flag is released when the guard drops, on every exit path.

#[cfg(test)]
#[path = "busy_test.rs"]
mod busy_test;

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct BusyFlag(AtomicBool);

impl BusyFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` when it is already held.
    #[must_use]
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        if self
            .0
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(BusyGuard { flag: self })
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Holds the slot until dropped.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.0.store(false, Ordering::Release);
    }
}
