pub mod search;

use num_traits::ToPrimitive;

use crate::errors::{self, Result};
use crate::BLOCK_BITS;

/// Validates the span `offset .. offset + count` against `len` and
/// returns its end.
pub fn check_span(who: &'static str, offset: u64, count: u64, len: u64) -> Result<u64> {
    if count == 0 {
        return errors::not_positive(who, "count");
    }

    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(end),
        Some(end) => errors::out_of_range(who, end, len),
        None => errors::out_of_range(who, !0, len),
    }
}

/// Converts a bit-domain quantity into a native index.
pub fn to_index(who: &'static str, value: u64) -> Result<usize> {
    value.to_usize().ok_or_else(|| errors::overflow(who, value))
}

/// The number of 64-bit blocks and of groups of `group_blocks` blocks
/// covering `len` bits.
///
/// Fails with an overflow error if a group start cannot be addressed as
/// a bit position.
pub fn table_layout(who: &'static str, len: u64, group_blocks: u64) -> Result<(u64, u64)> {
    let block_count = len / BLOCK_BITS + u64::from(len % BLOCK_BITS != 0);
    let group_count = block_count / group_blocks + u64::from(block_count % group_blocks != 0);

    group_count
        .checked_mul(group_blocks)
        .and_then(|blocks| blocks.checked_mul(BLOCK_BITS))
        .ok_or_else(|| errors::overflow(who, len))?;

    Ok((block_count, group_count))
}

/// Grows `vec` to `len` default elements; allocation failure is reported
/// as an overflow of `bits`.
pub fn grow_zeroed<T: Clone + Default>(
    who: &'static str,
    vec: &mut Vec<T>,
    len: usize,
    bits: u64,
) -> Result<()> {
    let additional = len.saturating_sub(vec.len());
    vec.try_reserve_exact(additional)
        .map_err(|_| errors::overflow(who, bits))?;
    vec.resize(len, T::default());
    Ok(())
}

/// Finds the group holding the `rank`th `value`-bit, given cumulative
/// one counts per group, and the rank left to find within it.
///
/// Requires `rank >= 1` and `table[0] == 0`.
pub fn select_group(table: &[u64], group_bits: u64, len: u64, value: bool, rank: u64) -> (usize, u64) {
    let cumulative = |group: usize| {
        let ones = table[group];
        if value {
            ones
        } else {
            (group as u64).saturating_mul(group_bits).min(len).saturating_sub(ones)
        }
    };

    let group = search::last_below(0, table.len(), rank, &cumulative);
    (group, rank - cumulative(group))
}
