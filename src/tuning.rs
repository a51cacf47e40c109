//! Process-wide tuning knobs for the sort dispatcher.
//!
//! These mirror `rdst`'s `TuningParameters`, but where that type is an immutable
//! snapshot threaded through a single call, this core exposes three mutable,
//! process-wide thresholds as relaxed atomics instead. Callers who need
//! determinism across concurrent tuning changes and sorts must serialize those
//! changes themselves; that serialization is out of scope for this module.

use std::sync::atomic::{AtomicUsize, Ordering};

const DEFAULT_INSERTION_THR: usize = 13;
const DEFAULT_MERGE_THR: usize = 4001;
const DEFAULT_THREAD_WORKLOAD: usize = 65536;

const MIN_INS: usize = 1;
const MIN_MRG: usize = 1;
const MIN_TW: usize = 1;

static INSERTION_THR: AtomicUsize = AtomicUsize::new(DEFAULT_INSERTION_THR);
static MERGE_THR: AtomicUsize = AtomicUsize::new(DEFAULT_MERGE_THR);
static THREAD_WORKLOAD: AtomicUsize = AtomicUsize::new(DEFAULT_THREAD_WORKLOAD);

#[inline]
fn clamp_to_min(n: isize, min: usize) -> usize {
    if n < min as isize {
        min
    } else {
        n as usize
    }
}

/// Sets the insertion-sort threshold: ranges at or below this length are sorted
/// directly by insertion sort instead of recursing into the merge or radix passes.
/// Silently clamped to at least 1.
pub fn set_insertion_threshold(n: isize) {
    INSERTION_THR.store(clamp_to_min(n, MIN_INS), Ordering::Relaxed);
}

/// Sets the merge-sort threshold: ranges at or below this length (and above the
/// insertion threshold) are sorted by the merge-pass driver instead of radix
/// decomposition. Silently clamped to at least 1.
pub fn set_merge_threshold(n: isize) {
    MERGE_THR.store(clamp_to_min(n, MIN_MRG), Ordering::Relaxed);
}

/// Sets the per-thread workload target used to size the initial thread count:
/// `threads = clamp(min(cpus, len / thread_workload), 1, cpus)`. Silently clamped
/// to at least 1.
pub fn set_thread_workload(n: isize) {
    THREAD_WORKLOAD.store(clamp_to_min(n, MIN_TW), Ordering::Relaxed);
}

#[inline]
pub(crate) fn insertion_threshold() -> usize {
    INSERTION_THR.load(Ordering::Relaxed)
}

#[inline]
pub(crate) fn merge_threshold() -> usize {
    MERGE_THR.load(Ordering::Relaxed)
}

#[inline]
pub(crate) fn thread_workload() -> usize {
    THREAD_WORKLOAD.load(Ordering::Relaxed)
}

#[cfg(test)]
static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Restores all three tunables to their documented defaults and returns a
/// guard that holds a process-wide test lock until dropped.
///
/// The tunables are process-wide statics, shared across every test in the
/// binary, so any test that reads or writes them needs exclusive access for
/// its duration — not just at the moment of reset — or it can observe another
/// thread's in-flight tuning change under `cargo test`'s default parallel
/// runner. Every such test across this crate binds the return value (`let _g
/// = reset_to_defaults();`) so the lock lives for the rest of the test.
#[cfg(test)]
pub(crate) fn reset_to_defaults() -> std::sync::MutexGuard<'static, ()> {
    let guard = TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    INSERTION_THR.store(DEFAULT_INSERTION_THR, Ordering::Relaxed);
    MERGE_THR.store(DEFAULT_MERGE_THR, Ordering::Relaxed);
    THREAD_WORKLOAD.store(DEFAULT_THREAD_WORKLOAD, Ordering::Relaxed);
    guard
}
