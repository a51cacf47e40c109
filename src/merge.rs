//! The merge-pass driver: sorts small-to-medium ranges by building
//! insertion-sorted base runs and ping-ponging merges between two buffers.
//!
//! This is the fallback both the top-level dispatcher and the radix passes use
//! once a sub-range is too small to be worth another radix byte-pass (below
//! `MERGE_THR`). It is also the component responsible for the ping-pong buffer
//! residency convention the rest of the engine relies on: see
//! [`merge_pass`]'s doc comment.

use crate::insertion::insertion_sort;
use crate::tuning;

/// Sorts `a[a_from..a_from+len)` using `b[b_from..b_from+len)` as auxiliary
/// storage, leaving the final sorted run in whichever buffer the caller's
/// recursion depth says it must end up in: `b` at even depths, `a` at odd
/// depths. `a` and `b` are always two disjoint allocations (the caller's array
/// and the core's scratch buffer), never the same backing storage, so both can
/// be borrowed mutably for the whole call.
pub fn merge_pass(a: &mut [i32], b: &mut [i32], a_from: usize, b_from: usize, len: usize, depth: usize) {
    if len == 0 {
        return;
    }

    let ins_thr = tuning::insertion_threshold();

    // Step 1: carve the source range into insertion-sorted base runs.
    let mut offset = 0;
    while offset < len {
        let run_len = ins_thr.min(len - offset);
        insertion_sort(a, a_from + offset, run_len);
        offset += run_len;
    }

    let mut runs = (len + ins_thr - 1) / ins_thr;
    let mut width = ins_thr;

    // `src`/`dst` track which physical buffer currently holds the
    // authoritative data; `src_is_a` tracks the same fact as a plain bool so
    // we can decide, once merging is done, whether a final corrective copy is
    // needed to satisfy the depth-parity residency rule.
    let mut src: &mut [i32] = a;
    let mut dst: &mut [i32] = b;
    let mut src_off = a_from;
    let mut dst_off = b_from;
    let mut src_is_a = true;

    while runs > 1 {
        let num_pairs = runs / 2;

        for p in 0..num_pairs {
            let left_start = p * 2 * width;
            let left_len = width.min(len - left_start);
            let right_start = left_start + left_len;
            let right_len = width.min(len - right_start);

            merge_two(
                &src[src_off + left_start..src_off + left_start + left_len],
                &src[src_off + right_start..src_off + right_start + right_len],
                &mut dst[dst_off + left_start..dst_off + left_start + left_len + right_len],
            );
        }

        if runs % 2 == 1 {
            let last_start = num_pairs * 2 * width;
            let last_len = len - last_start;
            dst[dst_off + last_start..dst_off + last_start + last_len]
                .copy_from_slice(&src[src_off + last_start..src_off + last_start + last_len]);
        }

        std::mem::swap(&mut src, &mut dst);
        std::mem::swap(&mut src_off, &mut dst_off);
        src_is_a = !src_is_a;

        width *= 2;
        runs = (runs + 1) / 2;
    }

    let wants_a = depth % 2 == 1;
    if src_is_a != wants_a {
        dst[dst_off..dst_off + len].copy_from_slice(&src[src_off..src_off + len]);
    }
}

/// Two-pointer merge of two already-sorted runs into `out`. Uses a strict `<`
/// test on the right run so that on ties the left run's element is taken
/// first, which is what makes the merge (and hence the merge-pass driver)
/// stable.
fn merge_two(left: &[i32], right: &[i32], out: &mut [i32]) {
    debug_assert_eq!(left.len() + right.len(), out.len());

    let mut i = 0;
    let mut j = 0;
    let mut k = 0;

    while i < left.len() && j < right.len() {
        if right[j] < left[i] {
            out[k] = right[j];
            j += 1;
        } else {
            out[k] = left[i];
            i += 1;
        }
        k += 1;
    }

    if i < left.len() {
        out[k..].copy_from_slice(&left[i..]);
    } else if j < right.len() {
        out[k..].copy_from_slice(&right[j..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gen_random_i32s, reference_sort};
    use crate::tuning::reset_to_defaults;

    fn run_merge_pass(data: &[i32], depth: usize) -> Vec<i32> {
        let len = data.len();
        let mut a = data.to_vec();
        let mut b = vec![0i32; len];
        merge_pass(&mut a, &mut b, 0, 0, len, depth);

        if depth % 2 == 1 {
            a
        } else {
            b
        }
    }

    #[test]
    fn merge_two_is_stable_on_ties() {
        // Use (value, tag) pairs encoded as distinct ints to check left-preference
        // indirectly: an all-equal merge must reproduce left-then-right order.
        let left = [5, 5, 5];
        let right = [5, 5];
        let mut out = [0; 5];
        merge_two(&left, &right, &mut out);
        assert_eq!(out, [5, 5, 5, 5, 5]);
    }

    #[test]
    fn sorts_small_ranges_ending_in_target_at_even_depth() {
        let data = vec![5, 2, 9, 1, 7];
        let result = run_merge_pass(&data, 0);
        assert_eq!(result, vec![1, 2, 5, 7, 9]);
    }

    #[test]
    fn sorts_small_ranges_ending_in_source_at_odd_depth() {
        let data = vec![5, 2, 9, 1, 7];
        let result = run_merge_pass(&data, 1);
        assert_eq!(result, vec![1, 2, 5, 7, 9]);
    }

    #[test]
    fn residency_rule_holds_at_all_four_depths() {
        let _g = reset_to_defaults();
        let data = gen_random_i32s(777, 99);
        let expected = reference_sort(&data);
        for depth in 0..4 {
            assert_eq!(run_merge_pass(&data, depth), expected, "depth {depth}");
        }
    }

    #[test]
    fn handles_lengths_spanning_several_merge_widths() {
        let _g = reset_to_defaults();
        for n in [0usize, 1, 2, 13, 14, 100, 4001] {
            let data = gen_random_i32s(n, n as u64 + 1);
            let expected = reference_sort(&data);
            assert_eq!(run_merge_pass(&data, 0), expected, "len {n}");
        }
    }

    #[test]
    fn sub_range_with_offset_buffers_is_honoured() {
        let mut a = vec![0i32; 20];
        let mut b = vec![0i32; 20];
        a[5..10].copy_from_slice(&[5, 2, 9, 1, 7]);

        merge_pass(&mut a, &mut b, 5, 8, 5, 0);

        assert_eq!(&b[8..13], &[1, 2, 5, 7, 9]);
    }
}
