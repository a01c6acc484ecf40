//! Batch cancellation

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const NONE_FAILED: usize = usize::MAX;

/// Handle for cancelling the tail of a batch
///
/// The handle tracks the lowest index reported as failed. Tasks after that index are
/// cancelled; tasks before it still run, so the batch outcome does not depend on which
/// task finishes first. Cloning shares the state.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    lowest_failure: Arc<AtomicUsize>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self {
            lowest_failure: Arc::new(AtomicUsize::new(NONE_FAILED)),
        }
    }
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure at `index`, cancelling every later task.
    /// Returns true when this lowered the cancellation point.
    pub fn fail_at(&self, index: usize) -> bool {
        self.lowest_failure.fetch_min(index, Ordering::SeqCst) > index
    }

    /// Check whether the task at `index` should be skipped
    pub fn is_cancelled(&self, index: usize) -> bool {
        index > self.lowest_failure.load(Ordering::SeqCst)
    }
}
