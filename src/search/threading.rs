//! Cancellation primitives for the parallel root search.
//!
//! Two layers of atomic stop flags: one per root task for selective
//! cancellation, one global for deadline expiry and obsolete searches. A
//! worker checks the combined [`SearchControl`] at every minimax node and
//! before publishing anything.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct StopFlag {
    stop: AtomicBool,
}

impl StopFlag {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// A worker's view of its own stop flag plus the global one.
#[derive(Debug, Clone)]
pub struct SearchControl {
    worker_stop: Arc<StopFlag>,
    global_stop: Arc<StopFlag>,
}

impl SearchControl {
    pub fn new(worker_stop: Arc<StopFlag>, global_stop: Arc<StopFlag>) -> Self {
        Self {
            worker_stop,
            global_stop,
        }
    }

    /// Control that never fires; single-threaded searches and tests use it.
    pub fn unstoppable() -> Self {
        Self::new(StopFlag::new(), StopFlag::new())
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.worker_stop.should_stop() || self.global_stop.should_stop()
    }
}

/// Bound the worker pool: never more threads than root moves, never more
/// than the requested maximum, defaulting to hardware parallelism.
pub fn resolve_worker_count(requested_max: usize, root_move_count: usize) -> usize {
    let hardware = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let max = if requested_max == 0 {
        hardware
    } else {
        requested_max
    };
    max.min(root_move_count).max(1)
}
