//! Accumulator for successful probe results.

use crate::scanner::traits::ProbeResult;
use std::sync::Mutex;

/// Append-only result collection shared by all workers.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Mutex<Vec<ProbeResult>>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one result.
    pub fn append(&self, result: ProbeResult) {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(result);
    }

    /// Take every result in insertion order.
    ///
    /// Call once all workers have finished.
    pub fn drain_all(&self) -> Vec<ProbeResult> {
        std::mem::take(
            &mut *self
                .results
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}
