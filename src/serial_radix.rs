//! The single-threaded MSD radix pass: count, prefix-sum, scatter, then recurse
//! into each non-empty bucket with buffers swapped. This is both a complete
//! sorting strategy on its own (used when the dispatcher decides a single
//! thread suffices) and the per-task body the parallel pass falls back to once
//! a bucket's thread budget has been divided down to one.

use crate::bucket::bucket;
use crate::merge::merge_pass;
use crate::tuning;

/// Sorts `source[s_from..s_from+len)` using `target[t_from..t_from+len)` as
/// scratch, at radix depth `depth`. Residency of the sorted result follows the
/// same depth-parity rule [`merge_pass`](crate::merge::merge_pass) does: it
/// ends up in `source` at odd depths and in `target` at even depths
/// (including depth 0, the top-level call). This holds by induction: whichever
/// branch terminates the recursion for a given bucket, either the merge-pass
/// fallback (parity-dependent by construction) or the `depth == 3` leaf (which
/// always copies into its own `source`, i.e. an odd depth), every intermediate
/// level swaps `source`/`target` for its children, flipping the parity by
/// exactly one level each time. A depth-0 caller must therefore read the
/// result out of `target`, not `source`.
pub fn radix_sort_serial(
    source: &mut [i32],
    target: &mut [i32],
    s_from: usize,
    t_from: usize,
    len: usize,
    depth: usize,
) {
    if len <= tuning::merge_threshold() {
        merge_pass(source, target, s_from, t_from, len, depth);
        return;
    }

    let mut hist = [0usize; 256];
    for i in 0..len {
        hist[bucket(source[s_from + i], depth) as usize] += 1;
    }

    let mut start = [0usize; 256];
    let mut running = 0usize;
    for b in 0..256 {
        start[b] = running;
        running += hist[b];
    }

    let mut processed = [0usize; 256];
    for i in 0..len {
        let key = source[s_from + i];
        let b = bucket(key, depth) as usize;
        target[t_from + start[b] + processed[b]] = key;
        processed[b] += 1;
    }

    if depth == 3 {
        source[s_from..s_from + len].copy_from_slice(&target[t_from..t_from + len]);
        return;
    }

    for b in 0..256 {
        if hist[b] == 0 {
            continue;
        }
        radix_sort_serial(
            target,
            source,
            t_from + start[b],
            s_from + start[b],
            hist[b],
            depth + 1,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gen_random_i32s, reference_sort};
    use crate::tuning::reset_to_defaults;

    fn run(data: &[i32]) -> Vec<i32> {
        let len = data.len();
        let mut source = data.to_vec();
        let mut target = vec![0i32; len];
        radix_sort_serial(&mut source, &mut target, 0, 0, len, 0);
        // Depth 0 is even, so the parity rule leaves the result in `target`.
        target
    }

    #[test]
    fn sorts_a_small_example() {
        let _g = reset_to_defaults();
        tuning::set_merge_threshold(1);
        tuning::set_insertion_threshold(1);
        assert_eq!(run(&[5, 2, 9, 1, 7]), vec![1, 2, 5, 7, 9]);
    }

    #[test]
    fn puts_int_min_and_int_max_at_the_ends() {
        let _g = reset_to_defaults();
        tuning::set_merge_threshold(1);
        let data = vec![-1, i32::MIN, i32::MAX, 0, 1, -2];
        let sorted = run(&data);
        assert_eq!(sorted.first(), Some(&i32::MIN));
        assert_eq!(sorted.last(), Some(&i32::MAX));
        assert_eq!(sorted, vec![i32::MIN, -2, -1, 0, 1, i32::MAX]);
    }

    #[test]
    fn forces_all_four_recursion_depths_with_tiny_thresholds() {
        let _g = reset_to_defaults();
        tuning::set_merge_threshold(1);
        tuning::set_insertion_threshold(1);

        for seed in 0..8u64 {
            let data = gen_random_i32s(20_000, seed * 31 + 1);
            let expected = reference_sort(&data);
            assert_eq!(run(&data), expected, "seed {seed}");
        }
    }

    #[test]
    fn agrees_with_reference_sort_at_default_thresholds() {
        let _g = reset_to_defaults();
        for seed in 0..8u64 {
            let data = gen_random_i32s(50_000, seed * 17 + 3);
            let expected = reference_sort(&data);
            assert_eq!(run(&data), expected, "seed {seed}");
        }
    }

    #[test]
    fn one_element_per_bucket_exercises_the_top_byte_pass() {
        let _g = reset_to_defaults();
        tuning::set_merge_threshold(1);
        let mut data: Vec<i32> = (0..256i32).map(|i| i << 24).collect();
        // shuffle deterministically
        for i in (1..data.len()).rev() {
            let j = (i * 2654435761u64 as usize) % (i + 1);
            data.swap(i, j);
        }
        let sorted = run(&data);
        let expected: Vec<i32> = (0..256i32).map(|i| i << 24).collect();
        assert_eq!(sorted, expected);
    }
}
