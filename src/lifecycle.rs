// Start/stop bookkeeping for the wasm entry points. No browser types, so the
// host tests can include this file directly.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Tracks whether the backdrop is running and which start is current.
///
/// `begin` hands out a ticket; an async init that resumes after an `await`
/// installs itself only while `is_current(ticket)` holds. Any `end` in
/// between invalidates every ticket issued so far.
pub struct Lifecycle {
    running: AtomicBool,
    generation: AtomicU32,
}

impl Lifecycle {
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            generation: AtomicU32::new(0),
        }
    }

    /// Mark the backdrop as starting. `None` if it is already running.
    pub fn begin(&self) -> Option<u32> {
        if self.running.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(self.generation.fetch_add(1, Ordering::SeqCst).wrapping_add(1))
    }

    pub fn end(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_current(&self, ticket: u32) -> bool {
        self.running.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == ticket
    }

    /// A failed init releases the slot, unless a newer start already owns it.
    pub fn abandon(&self, ticket: u32) {
        if self.is_current(ticket) {
            self.end();
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
