//! The signed-key-to-bucket transform that drives every radix pass.
//!
//! This plays the role `RadixKey::get_level` plays in `rdst`, specialized to the
//! one key type this core ever sorts (`i32`) instead of being generic over an
//! arbitrary `RadixKey` implementation; wider keys and user-defined records
//! are out of scope here.

pub const DEPTHS: usize = 4;

/// Extracts the byte of `key` that radix depth `d` groups by.
///
/// Depth `d` selects byte `3 - d` counted from the least significant byte, so
/// `d = 0` is the most significant byte and `d = 3` the least. At `d = 0` the key
/// is XORed with `0x8000_0000` first, which flips the sign bit and remaps the
/// signed range `[i32::MIN, i32::MAX]` onto unsigned `[0, u32::MAX]` in the same
/// order, so `bucket(i32::MIN, 0) == 0x00` and `bucket(i32::MAX, 0) == 0xFF`.
/// Lower bytes are read from the key unmodified: within a single top-byte bucket
/// every key shares the same sign, so no further transform is needed.
#[inline(always)]
pub fn bucket(key: i32, depth: usize) -> u8 {
    debug_assert!(depth < DEPTHS);

    let bits = if depth == 0 {
        (key as u32) ^ 0x8000_0000
    } else {
        key as u32
    };

    let shift = (3 - depth) * 8;
    (bits >> shift) as u8
}
