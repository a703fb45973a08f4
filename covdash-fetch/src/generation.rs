//! Last-request-wins bookkeeping.
//!
//! Facade requests are independent and may complete out of order. A caller
//! that only cares about its latest request takes a [`Generation`] before
//! issuing it and drops any response whose generation is no longer current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Ticket identifying one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing generations.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    /// Creates a tracker with no requests issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, superseding every earlier one.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Returns true if no request was started after `generation`.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::Acquire) == generation.0
    }

    /// Passes `value` through if `generation` is still current.
    pub fn accept<T>(&self, generation: Generation, value: T) -> Option<T> {
        if self.is_current(generation) {
            Some(value)
        } else {
            debug!(generation = generation.0, "Discarding stale response");
            None
        }
    }
}
