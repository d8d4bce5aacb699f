//! The single-flight drain gate.

use std::sync::atomic::{AtomicBool, Ordering, fence};

/// Binary, non-blocking exclusion token.
///
/// Acquisition never waits: a caller that loses gets `None` and returns.
#[derive(Debug, Default)]
pub(crate) struct DrainGate {
    held: AtomicBool,
}

impl DrainGate {
    /// Try to become the drain owner.
    pub(crate) fn try_acquire(&self) -> Option<DrainPermit<'_>> {
        // Orders the caller's preceding enqueue before the gate read. Pairs
        // with the fence in `DrainPermit::drop`.
        fence(Ordering::SeqCst);
        self.held
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| DrainPermit { gate: self })
    }

    pub(crate) fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}

/// Proof of drain ownership. Dropping it releases the gate, including
/// during unwinding.
#[derive(Debug)]
pub(crate) struct DrainPermit<'a> {
    gate: &'a DrainGate,
}

impl Drop for DrainPermit<'_> {
    fn drop(&mut self) {
        self.gate.held.store(false, Ordering::SeqCst);
        // After this point either the releasing owner sees every enqueue
        // that failed to acquire, or that enqueuer sees the gate free.
        fence(Ordering::SeqCst);
    }
}
