//! Broadword operations treating `u64` as a parallel vector.
//!
//! From [Sebastiano Vigna, “Broadword Implementation of
//! Rank/Select Queries”](http://sux.di.unimi.it/paper.pdf).
//!
//! Unless stated otherwise, bit positions are counted from the least
//! significant bit. The `_msb` variants count from the most significant
//! bit, which is how the packed stores in [`storage`](../storage/index.html)
//! lay out their 64-bit chunks.

/// Has the lowest bit of every octet set: `0x0101010101010101`.
pub const L8: u64 = 0x0101_0101_0101_0101;

/// Counts the number of ones in a `u64`.
///
/// Uses the broadword algorithm from Vigna.
#[inline]
pub fn count_ones(mut x: u64) -> u32 {
    x = x.wrapping_sub((x >> 1) & 0x5555_5555_5555_5555);
    x = (x & 0x3333_3333_3333_3333).wrapping_add((x >> 2) & 0x3333_3333_3333_3333);
    x = x.wrapping_add(x >> 4) & 0x0F0F_0F0F_0F0F_0F0F;
    (x.wrapping_mul(L8) >> 56) as u32
}

/// Counts the bits of `word` equal to `value`.
#[inline]
pub fn rank(word: u64, value: bool) -> u32 {
    if value {
        count_ones(word)
    } else {
        count_ones(!word)
    }
}

/// Counts the bits equal to `value` among the `offset` most significant
/// bits of `word`.
///
/// An `offset` of 0 counts nothing.
#[inline]
pub fn rank_msb(word: u64, offset: u32, value: bool) -> u32 {
    debug_assert!(offset <= 64, "rank_msb: offset out of bounds");

    if offset == 0 {
        return 0;
    }

    let word = if value { word } else { !word };
    count_ones(word & !low_mask(64 - offset))
}

/// Counts the bits equal to `value` among the `limit` least significant
/// bits of `word`.
#[inline]
pub fn rank_lower(word: u64, limit: u32, value: bool) -> u32 {
    debug_assert!(limit <= 64, "rank_lower: limit out of bounds");

    let word = if value { word } else { !word };
    count_ones(word & low_mask(limit))
}

/// The mask with the `bits` lowest bits set.
#[inline]
pub fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        !0
    } else {
        (1 << bits) - 1
    }
}

/// Finds the position of the `rank`th one bit of `word` (counting from 1),
/// as an offset from the least significant bit.
///
/// Folds the word into partial population counts over 2-, 4-, 8-, 16- and
/// 32-bit fields, then descends through the halves that hold the
/// remaining rank.
///
/// The result is meaningless unless `1 <= rank <= count_ones(word)`.
#[inline]
pub fn select(word: u64, rank: u32) -> u32 {
    debug_assert!(rank >= 1, "select: rank must be positive");

    let x1 = ((word & 0xAAAA_AAAA_AAAA_AAAA) >> 1) + (word & 0x5555_5555_5555_5555);
    let x2 = ((x1 & 0xCCCC_CCCC_CCCC_CCCC) >> 2) + (x1 & 0x3333_3333_3333_3333);
    let x3 = ((x2 & 0xF0F0_F0F0_F0F0_F0F0) >> 4) + (x2 & 0x0F0F_0F0F_0F0F_0F0F);
    let x4 = ((x3 & 0xFF00_FF00_FF00_FF00) >> 8) + (x3 & 0x00FF_00FF_00FF_00FF);
    let x5 = ((x4 & 0xFFFF_0000_FFFF_0000) >> 16) + (x4 & 0x0000_FFFF_0000_FFFF);

    let mut rank = u64::from(rank);
    let mut pos = 0;

    for &(partial, width, mask) in &[
        (x5, 32, 0xFFFF_FFFF),
        (x4, 16, 0xFFFF),
        (x3, 8, 0xFF),
        (x2, 4, 0xF),
        (x1, 2, 0x3),
        (word, 1, 0x1),
    ] {
        let count = (partial >> pos) & mask;
        if rank > count {
            rank -= count;
            pos += width;
        }
    }

    pos
}

/// Finds the position of the `rank`th bit of `word` equal to `value`.
#[inline]
pub fn select_by(word: u64, value: bool, rank: u32) -> u32 {
    if value {
        select(word, rank)
    } else {
        select(!word, rank)
    }
}

/// Reverses the bit order of a `u64`.
#[inline]
pub fn reverse_u64(mut x: u64) -> u64 {
    x = ((x & 0x5555_5555_5555_5555) << 1) | ((x >> 1) & 0x5555_5555_5555_5555);
    x = ((x & 0x3333_3333_3333_3333) << 2) | ((x >> 2) & 0x3333_3333_3333_3333);
    x = ((x & 0x0F0F_0F0F_0F0F_0F0F) << 4) | ((x >> 4) & 0x0F0F_0F0F_0F0F_0F0F);
    x = ((x & 0x00FF_00FF_00FF_00FF) << 8) | ((x >> 8) & 0x00FF_00FF_00FF_00FF);
    // The last two swaps as one rotation of 16-bit lanes.
    (x << 48) | ((x & 0xFFFF_0000) << 16) | ((x >> 16) & 0xFFFF_0000) | (x >> 48)
}

/// Reverses the bit order of a `u32`.
#[inline]
pub fn reverse_u32(mut x: u32) -> u32 {
    x = ((x & 0x5555_5555) << 1) | ((x >> 1) & 0x5555_5555);
    x = ((x & 0x3333_3333) << 2) | ((x >> 2) & 0x3333_3333);
    x = ((x & 0x0F0F_0F0F) << 4) | ((x >> 4) & 0x0F0F_0F0F);
    (x << 24) | ((x & 0xFF00) << 8) | ((x >> 8) & 0xFF00) | (x >> 24)
}

/// Packs the 64 booleans starting at `index` into a word, first boolean
/// in the most significant bit.
///
/// Positions past the end of `bits` read as 0.
pub fn pack_bools(bits: &[bool], index: usize) -> u64 {
    let tail = bits.get(index..).unwrap_or(&[]);
    let mut result = 0;

    for i in 0..64 {
        result <<= 1;
        if tail.get(i).copied().unwrap_or(false) {
            result |= 1;
        }
    }

    result
}

/// Concatenates `words[index]` (high half) and `words[index + 1]` (low
/// half) into one word.
///
/// Missing words read as 0.
pub fn pack_u32_pair(words: &[u32], index: usize) -> u64 {
    let high = words.get(index).copied().unwrap_or(0);
    let low = index
        .checked_add(1)
        .and_then(|next| words.get(next))
        .copied()
        .unwrap_or(0);

    (u64::from(high) << 32) | u64::from(low)
}

/// Unpacks a word into 64 booleans, most significant bit first.
///
/// This is the inverse of [`pack_bools`](fn.pack_bools.html).
pub fn unpack_u64(word: u64) -> [bool; 64] {
    let mut result = [false; 64];

    for (i, bit) in result.iter_mut().enumerate() {
        *bit = word & (1 << (63 - i)) != 0;
    }

    result
}
