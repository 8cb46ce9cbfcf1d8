//! Process-wide generation pass counter.
//!
//! Every pass is stamped with a monotonically increasing run id so
//! regenerated artifacts can be told apart across passes within one host
//! process. The counter is injected into the generator rather than read as
//! ambient global state, which keeps synthesis testable with a private
//! counter. No persistence across process restarts.

use std::sync::atomic::{AtomicU32, Ordering};

/// Monotonically increasing pass counter.
///
/// `next()` is atomic: the host may run several generator instances in one
/// process and each pass must still get a distinct stamp.
#[derive(Debug, Default)]
pub struct RunCounter(AtomicU32);

impl RunCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Increment and return the new run id. The first pass observes `1`.
    pub fn next(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The shared process-wide counter.
    pub fn process() -> &'static RunCounter {
        static PROCESS: RunCounter = RunCounter::new();
        &PROCESS
    }
}
