//! # msd-radix-sort
//!
//! A parallel, most-significant-digit radix sort over contiguous ranges of
//! signed 32-bit integers.
//!
//! ## Usage
//!
//! ```
//! let mut data = vec![5, 2, 9, 1, 7];
//! msd_radix_sort::sort(&mut data);
//! assert_eq!(data, vec![1, 2, 5, 7, 9]);
//! ```
//!
//! [`sort_range`] sorts just a sub-range of the array in place, leaving
//! everything outside `[from, to)` untouched:
//!
//! ```
//! let mut data = vec![5, 2, 9, 1, 7, 3];
//! msd_radix_sort::sort_range(&mut data, 1, 5).unwrap();
//! assert_eq!(data, vec![5, 1, 2, 7, 9, 3]);
//! ```
//!
//! ## How it works
//!
//! Small ranges are handled directly by an insertion sort
//! ([`INSERTION_THR`](tuning::set_insertion_threshold)) or a merge-pass
//! driver ([`MERGE_THR`](tuning::set_merge_threshold)). Larger ranges go
//! through a most-significant-byte-first radix decomposition: each of the
//! four bytes of the key is used, top byte first, to bucket elements into 256
//! groups via a histogram/prefix-sum/scatter pass, then each non-empty bucket
//! is sorted recursively on the next byte down. Above `THREAD_WORKLOAD`
//! elements, that decomposition is split across ordinary OS threads instead
//! of running on a single thread; the parallel radix pass balances
//! non-empty buckets across a worker group with a shuffled greedy packing so
//! no one thread gets stuck with a disproportionate share.
//!
//! Signed keys are handled by flipping the sign bit before bucketing the top
//! byte, which maps the signed range onto an unsigned one in the same order.
//!
//! ## License
//!
//! Licensed under either of
//!
//! * Apache License, Version 2.0, ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.
//!
//! ### Contribution
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.

mod bucket;
mod error;
mod insertion;
mod merge;
mod parallel_radix;
mod serial_radix;
pub mod tuning;

#[cfg(test)]
mod test_support;

pub use error::SortError;
pub use tuning::{set_insertion_threshold, set_merge_threshold, set_thread_workload};

use parallel_radix::radix_sort_parallel;
use serial_radix::radix_sort_serial;

/// Sorts the whole of `data` in place.
///
/// Infallible: the only failure modes of [`sort_range`] are range checks, and
/// `0..data.len()` is always a valid range.
pub fn sort(data: &mut [i32]) {
    let len = data.len();
    sort_range(data, 0, len as isize).expect("0..len is always a valid range");
}

/// Sorts `data[from..to)` in place, leaving everything outside that range
/// untouched.
///
/// # Errors
///
/// Returns [`SortError::OutOfBounds`] if `from < 0` or `to > data.len()`, or
/// [`SortError::InvalidRange`] if `from > to`. In either case `data` is left
/// completely unmodified; these checks run before any allocation or write.
///
/// Returns [`SortError::Interrupted`] if a worker thread panicked during a
/// parallel pass; in that case `data[from..to)` may be left partially
/// permuted.
pub fn sort_range(data: &mut [i32], from: isize, to: isize) -> Result<(), SortError> {
    let len_isize = data.len() as isize;
    if from < 0 || from > len_isize {
        return Err(SortError::OutOfBounds {
            index: from,
            len: data.len(),
        });
    }
    if to < 0 || to > len_isize {
        return Err(SortError::OutOfBounds {
            index: to,
            len: data.len(),
        });
    }
    if from > to {
        return Err(SortError::InvalidRange { from, to });
    }

    let from = from as usize;
    let to = to as usize;
    let len = to - from;

    if len < 2 {
        return Ok(());
    }

    if len <= tuning::insertion_threshold() {
        insertion::insertion_sort(data, from, len);
        return Ok(());
    }

    let mut scratch = vec![0i32; len];

    if len <= tuning::merge_threshold() {
        merge::merge_pass(data, &mut scratch, from, 0, len, 0);
        // Depth 0 is even, so the residency rule leaves the sorted run in
        // `scratch`, not `data`.
        data[from..from + len].copy_from_slice(&scratch[..len]);
        return Ok(());
    }

    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = (len / tuning::thread_workload()).clamp(1, cpus);

    if threads == 1 {
        radix_sort_serial(data, &mut scratch, from, 0, len, 0);
    } else {
        radix_sort_parallel(data, &mut scratch, from, 0, len, 0, threads)?;
    }
    // Same even-depth residency rule as the merge pass: depth 0's sorted
    // result lands in `scratch`, so copy it back into `data`.
    data[from..from + len].copy_from_slice(&scratch[..len]);

    Ok(())
}
