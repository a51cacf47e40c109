//! The parallel MSD radix pass: the same count/prefix-sum/scatter pipeline as
//! [`crate::serial_radix`], but with each phase split across ordinary OS
//! threads joined with [`std::thread::scope`] instead of a cooperative
//! work-stealing runtime; this core never pulls in `rayon` for its own
//! sorting work, only as a dev-dependency for benchmarking. The calling
//! thread always does its share of the work inline as the last worker of
//! every phase, rather than sitting idle waiting on a pool.
//!
//! Bucket-to-thread assignment (phase 5 below) is grounded on
//! `scanning_radix_sort.rs`'s `get_scanner_buckets`: both split a destination
//! buffer into per-bucket chunks with `arbitrary_chunks_mut` up front, then
//! hand those chunks out to workers rather than recomputing offsets per
//! worker. Where that file uses a `TryMutex` per bucket so several scanner
//! threads can opportunistically steal work from whichever bucket is free,
//! this pass only ever has one writer attempt a bucket chunk per scatter
//! round, so a plain `Mutex` is enough.

use crate::bucket::bucket;
use crate::error::{from_panic, SortError};
use crate::serial_radix::radix_sort_serial;
use crate::tuning;
use arbitrary_chunks::ArbitraryChunks;
use rand::seq::SliceRandom;
use std::sync::Mutex;

/// Splits a length into `parts` contiguous, near-equal ranges; the last range
/// absorbs whatever doesn't divide evenly.
fn partition_range(len: usize, parts: usize) -> Vec<(usize, usize)> {
    let base = len / parts;
    let mut out = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let this_len = if i == parts - 1 { len - start } else { base };
        out.push((start, start + this_len));
        start += this_len;
    }
    out
}

fn count_range(data: &[i32], depth: usize) -> [usize; 256] {
    let mut hist = [0usize; 256];
    for &k in data {
        hist[bucket(k, depth) as usize] += 1;
    }
    hist
}

/// Buckets `src` by its own local counter, then flushes each non-empty stash
/// into the matching `Mutex`-guarded chunk of the shared destination buffer at
/// the offset `predecessor_prefix` says this worker owns within that bucket.
fn scatter_worker(
    src: &[i32],
    depth: usize,
    predecessor_prefix: &[usize; 256],
    bucket_chunks: &[Mutex<&mut [i32]>],
) {
    let mut stash: Vec<Vec<i32>> = (0..256).map(|_| Vec::new()).collect();
    for &k in src {
        stash[bucket(k, depth) as usize].push(k);
    }

    for (b, items) in stash.into_iter().enumerate() {
        if items.is_empty() {
            continue;
        }
        let mut guard = bucket_chunks[b].lock().unwrap();
        let start = predecessor_prefix[b];
        guard[start..start + items.len()].copy_from_slice(&items);
    }
}

/// Sorts `source[s_from..s_from+len)` using `target[t_from..t_from+len)` as
/// scratch, the same contract [`radix_sort_serial`] keeps, except the count,
/// scatter and recursion phases are each divided across `threads` OS threads.
/// Residency of the sorted result follows the same depth-parity rule as
/// [`radix_sort_serial`]: `source` at odd depths, `target` at even depths
/// (including depth 0). `threads` must be at least 2; callers dispatch
/// `threadBudget <= 1` tasks to the serial pass instead, so this function
/// never has to degrade to a single worker itself.
pub fn radix_sort_parallel(
    source: &mut [i32],
    target: &mut [i32],
    s_from: usize,
    t_from: usize,
    len: usize,
    depth: usize,
    threads: usize,
) -> Result<(), SortError> {
    debug_assert!(threads >= 2);

    if len <= tuning::merge_threshold() {
        radix_sort_serial(source, target, s_from, t_from, len, depth);
        return Ok(());
    }

    let src_view = &source[s_from..s_from + len];
    let ranges = partition_range(len, threads);

    // Phase 1: parallel counting. Every worker reads its own contiguous
    // sub-range of `src_view`; no writes happen here, so the immutable
    // sub-slices can be handed to several threads at once without any
    // synchronization.
    let mut local_hists = vec![[0usize; 256]; threads];
    std::thread::scope(|s| -> Result<(), SortError> {
        let mut handles = Vec::with_capacity(threads - 1);
        for &(start, end) in ranges.iter().take(threads - 1) {
            let sub = &src_view[start..end];
            handles.push(s.spawn(move || count_range(sub, depth)));
        }

        let (ls, le) = ranges[threads - 1];
        local_hists[threads - 1] = count_range(&src_view[ls..le], depth);

        for (i, h) in handles.into_iter().enumerate() {
            local_hists[i] = h.join().map_err(from_panic)?;
        }
        Ok(())
    })?;

    // Phase 2: reduce local histograms into the global histogram, and derive
    // `spawn`, the number of worker groups phase 5 will balance buckets across.
    let mut hist = [0usize; 256];
    for lh in &local_hists {
        for b in 0..256 {
            hist[b] += lh[b];
        }
    }
    let nb = hist.iter().filter(|&&c| c > 0).count();
    let spawn = nb.min(threads).max(1);

    // Each scatter worker's processed-index map starts at the prefix sum of
    // its predecessors' local histograms, so workers never contend for the
    // same destination index within a bucket.
    let mut predecessor_prefix = vec![[0usize; 256]; threads];
    let mut running = [0usize; 256];
    for w in 0..threads {
        predecessor_prefix[w] = running;
        for b in 0..256 {
            running[b] += local_hists[w][b];
        }
    }

    // Phase 3: parallel scatter. `target_sub` is split into one mutable chunk
    // per bucket up front; workers only ever touch the chunk for the bucket
    // they're currently writing into, guarded by its own mutex.
    let target_sub = &mut target[t_from..t_from + len];
    let bucket_chunks: Vec<Mutex<&mut [i32]>> = target_sub
        .arbitrary_chunks_mut(&hist.to_vec())
        .map(Mutex::new)
        .collect();

    std::thread::scope(|s| -> Result<(), SortError> {
        let mut handles = Vec::with_capacity(threads - 1);
        for (w, &(start, end)) in ranges.iter().enumerate().take(threads - 1) {
            let sub = &src_view[start..end];
            let prefix = predecessor_prefix[w];
            let chunks = &bucket_chunks;
            handles.push(s.spawn(move || scatter_worker(sub, depth, &prefix, chunks)));
        }

        let w = threads - 1;
        let (ls, le) = ranges[w];
        scatter_worker(&src_view[ls..le], depth, &predecessor_prefix[w], &bucket_chunks);

        for h in handles {
            h.join().map_err(from_panic)?;
        }
        Ok(())
    })?;

    if depth == 3 {
        let mut offset = 0;
        for m in bucket_chunks {
            let chunk = m.into_inner().unwrap();
            source[s_from + offset..s_from + offset + chunk.len()].copy_from_slice(chunk);
            offset += chunk.len();
        }
        return Ok(());
    }

    // The mutexes did their job; reclaim plain `&mut [i32]` chunks now that
    // all scatter workers have joined and no concurrent access remains.
    let target_bucket_slices: Vec<&mut [i32]> = bucket_chunks
        .into_iter()
        .map(|m| m.into_inner().unwrap())
        .collect();

    // Phase 5: partition non-empty buckets across `spawn` worker groups.
    // `source_sub` supplies each bucket's new scratch space, carved the same
    // way as `target_sub` so the two line up chunk-for-chunk.
    let source_sub = &mut source[s_from..s_from + len];
    let source_bucket_slices: Vec<&mut [i32]> =
        source_sub.arbitrary_chunks_mut(&hist.to_vec()).collect();

    let mut tasks: Vec<(&mut [i32], &mut [i32])> = target_bucket_slices
        .into_iter()
        .zip(source_bucket_slices)
        .filter(|(t, _)| !t.is_empty())
        .collect();

    let mut rng = rand::rng();
    tasks.shuffle(&mut rng);

    let target_per_group = (len / spawn).max(1);
    let mut groups: Vec<Vec<(&mut [i32], &mut [i32])>> = Vec::with_capacity(spawn);
    let mut current = Vec::new();
    let mut running_sum = 0usize;
    for task in tasks {
        running_sum += task.0.len();
        current.push(task);
        if running_sum >= target_per_group && groups.len() + 1 < spawn {
            groups.push(std::mem::take(&mut current));
            running_sum = 0;
        }
    }
    if !current.is_empty() || groups.is_empty() {
        groups.push(current);
    }
    while groups.len() < spawn {
        groups.push(Vec::new());
    }

    let per_group_budget = threads / spawn;
    let extra = threads % spawn;

    // Phase 6: run each group's bucket list on its own thread, recursing into
    // the parallel pass again if the group still has more than one thread to
    // spend, otherwise falling back to the serial pass.
    std::thread::scope(|s| -> Result<(), SortError> {
        let last = groups.len() - 1;
        let mut handles = Vec::with_capacity(last);

        for (i, group) in groups.drain(..last).enumerate() {
            let budget = per_group_budget + if i < extra { 1 } else { 0 };
            handles.push(s.spawn(move || run_group(group, depth + 1, budget)));
        }

        let last_budget = per_group_budget + if last < extra { 1 } else { 0 };
        let last_group = groups.pop().unwrap();
        run_group(last_group, depth + 1, last_budget)?;

        for h in handles {
            h.join().map_err(from_panic)??;
        }
        Ok(())
    })
}

fn run_group(
    tasks: Vec<(&mut [i32], &mut [i32])>,
    depth: usize,
    budget: usize,
) -> Result<(), SortError> {
    for (new_source, new_target) in tasks {
        let len = new_source.len();
        if budget > 1 {
            radix_sort_parallel(new_source, new_target, 0, 0, len, depth, budget)?;
        } else {
            radix_sort_serial(new_source, new_target, 0, 0, len, depth);
        }
    }
    Ok(())
}
