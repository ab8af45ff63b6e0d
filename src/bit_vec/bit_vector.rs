use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::{RankSelect, RankSelectMut};
use crate::broadword;
use crate::errors::{self, Result};
use crate::internal::{check_span, grow_zeroed, select_group, table_layout, to_index};
use crate::space_usage::SpaceUsage;
use crate::BLOCK_BITS;

/// Blocks per rank-table entry.
pub const GROUP_BLOCKS: usize = 4;

/// Bits per rank-table entry.
pub const GROUP_BITS: u64 = GROUP_BLOCKS as u64 * BLOCK_BITS;

/// An owned, mutable bit vector supporting rank and select.
///
/// Bit `i` lives in block `i / 64` at the least significant position
/// `i % 64`. The rank table holds one cumulative count per group of
/// [`GROUP_BLOCKS`](constant.GROUP_BLOCKS.html) blocks, plus a final
/// entry with the total.
///
/// # Examples
///
/// ```
/// use bit_index::{BitVector, RankSelect, RankSelectMut};
///
/// let mut bits = BitVector::new(100).unwrap();
/// bits.set(3, true).unwrap();
/// bits.set(70, true).unwrap();
/// bits.build_index().unwrap();
///
/// assert_eq!(1, bits.rank1(70).unwrap());
/// assert_eq!(2, bits.rank1(71).unwrap());
/// assert_eq!(70, bits.select1(2).unwrap());
/// assert_eq!(4, bits.select0(4).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct BitVector {
    blocks: Vec<u64>,
    rank_table: Vec<u64>,
    len: u64,
    total_pop_count: u64,
}

/// Block and rank-table sizes for a vector of `len` bits.
fn layout(who: &'static str, len: u64) -> Result<(usize, usize)> {
    let (block_count, group_count) = table_layout(who, len, GROUP_BLOCKS as u64)?;
    Ok((to_index(who, block_count)?, to_index(who, group_count + 1)?))
}

impl BitVector {
    /// Creates a vector of `len` clear bits, already indexed.
    ///
    /// # Errors
    ///
    /// Overflow error if the blocks or rank table for `len` bits cannot be
    /// sized or allocated.
    pub fn new(len: u64) -> Result<Self> {
        let mut result = BitVector::default();
        result.initialize("BitVector::new", len)?;
        Ok(result)
    }

    /// Creates an indexed vector holding a copy of `bits`.
    pub fn from_bits(bits: &[bool]) -> Result<Self> {
        let mut result = BitVector::new(bits.len() as u64)?;
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                result.write_bit(i as u64, true);
            }
        }
        result.build_index()?;
        Ok(result)
    }

    /// The number of 64-bit blocks.
    pub fn block_len(&self) -> usize {
        self.blocks.len()
    }

    /// The underlying blocks, least significant bit first.
    ///
    /// Bits of the last block past `len()` are always 0.
    pub fn blocks(&self) -> &[u64] {
        &self.blocks
    }

    /// Iterates over all the bits.
    pub fn iter(&self) -> Iter {
        Iter {
            vector: self,
            start: 0,
            limit: self.len,
        }
    }

    fn initialize(&mut self, who: &'static str, len: u64) -> Result<()> {
        let (block_count, table_len) = layout(who, len)?;

        let mut blocks = Vec::new();
        grow_zeroed(who, &mut blocks, block_count, len)?;
        let mut rank_table = Vec::new();
        grow_zeroed(who, &mut rank_table, table_len, len)?;

        self.blocks = blocks;
        self.rank_table = rank_table;
        self.len = len;
        self.total_pop_count = 0;
        Ok(())
    }

    #[inline]
    fn read_bit(&self, index: u64) -> bool {
        let block = self.blocks[(index / BLOCK_BITS) as usize];
        block & (1 << (index % BLOCK_BITS)) != 0
    }

    #[inline]
    fn write_bit(&mut self, index: u64, value: bool) {
        let block = &mut self.blocks[(index / BLOCK_BITS) as usize];
        let mask = 1 << (index % BLOCK_BITS);
        if value {
            *block |= mask;
        } else {
            *block &= !mask;
        }
    }

    fn check_index(&self, who: &'static str, index: u64) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            errors::out_of_range(who, index, self.len)
        }
    }

    // Ones among the first `count` bits, for `count <= len`.
    fn rank_ones(&self, count: u64) -> u64 {
        let block = (count / BLOCK_BITS) as usize;
        let group = block / GROUP_BLOCKS;

        let mut result = self.rank_table[group];
        for &word in &self.blocks[group * GROUP_BLOCKS..block] {
            result += u64::from(broadword::count_ones(word));
        }

        let within = (count % BLOCK_BITS) as u32;
        if within > 0 {
            result += u64::from(broadword::rank_lower(self.blocks[block], within, true));
        }

        result
    }
}

impl Default for BitVector {
    fn default() -> Self {
        BitVector {
            blocks: Vec::new(),
            rank_table: vec![0],
            len: 0,
            total_pop_count: 0,
        }
    }
}

impl RankSelect for BitVector {
    type Bits<'a> = Iter<'a> where Self: 'a;

    #[inline]
    fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    fn total_pop_count(&self) -> u64 {
        self.total_pop_count
    }

    fn access(&self, index: u64) -> Result<bool> {
        self.check_index("BitVector::access", index)?;
        Ok(self.read_bit(index))
    }

    fn access_range(&self, offset: u64, count: u64) -> Result<Self::Bits<'_>> {
        let limit = check_span("BitVector::access_range", offset, count, self.len)?;
        Ok(Iter {
            vector: self,
            start: offset,
            limit,
        })
    }

    fn rank(&self, value: bool, count: u64) -> Result<u64> {
        const WHO: &str = "BitVector::rank";

        if count == 0 {
            return errors::not_positive(WHO, "count");
        }
        if count > self.len {
            return errors::out_of_range(WHO, count, self.len);
        }

        let ones = self.rank_ones(count);
        Ok(if value {
            ones
        } else {
            count.saturating_sub(ones)
        })
    }

    fn select(&self, value: bool, rank: u64) -> Result<u64> {
        const WHO: &str = "BitVector::select";

        if rank == 0 {
            return errors::not_positive(WHO, "rank");
        }
        let available = self.count_of(value);
        if rank > available {
            return errors::rank_too_large(WHO, rank, available);
        }

        let len = self.len;
        let (group, mut remaining) = select_group(&self.rank_table, GROUP_BITS, len, value, rank);

        let first = group * GROUP_BLOCKS;
        for (i, &word) in self.blocks.iter().enumerate().skip(first).take(GROUP_BLOCKS) {
            let count = u64::from(broadword::rank(word, value));
            if remaining <= count {
                let position =
                    i as u64 * BLOCK_BITS + u64::from(broadword::select_by(word, value, remaining as u32));
                // Zeros past the end pad the last block.
                if position < len {
                    return Ok(position);
                }
                break;
            }
            remaining -= count;
        }

        // Only reachable when the index is stale.
        errors::rank_too_large(WHO, rank, available)
    }

    fn build_index(&mut self) -> Result<()> {
        let mut total = 0;

        for (group, chunk) in self.blocks.chunks(GROUP_BLOCKS).enumerate() {
            self.rank_table[group] = total;
            total += chunk
                .iter()
                .map(|&word| u64::from(broadword::count_ones(word)))
                .sum::<u64>();
        }

        if let Some(last) = self.rank_table.last_mut() {
            *last = total;
        }
        self.total_pop_count = total;

        debug!(
            len = self.len,
            blocks = self.blocks.len(),
            total_pop_count = total,
            "rebuilt bit vector index"
        );
        Ok(())
    }
}

impl RankSelectMut for BitVector {
    fn set(&mut self, index: u64, value: bool) -> Result<()> {
        self.check_index("BitVector::set", index)?;
        self.write_bit(index, value);
        Ok(())
    }

    fn set_range(&mut self, index: u64, values: &[bool]) -> Result<()> {
        const WHO: &str = "BitVector::set_range";

        if values.is_empty() {
            return errors::not_positive(WHO, "values length");
        }
        check_span(WHO, index, values.len() as u64, self.len)?;

        for (offset, &value) in values.iter().enumerate() {
            self.write_bit(index + offset as u64, value);
        }
        Ok(())
    }

    fn toggle(&mut self, index: u64) -> Result<()> {
        self.check_index("BitVector::toggle", index)?;
        self.blocks[(index / BLOCK_BITS) as usize] ^= 1 << (index % BLOCK_BITS);
        Ok(())
    }

    fn toggle_range(&mut self, offset: u64, count: u64) -> Result<()> {
        let end = check_span("BitVector::toggle_range", offset, count, self.len)?;

        let mut position = offset;
        while position < end {
            let block = position / BLOCK_BITS;
            let block_start = block * BLOCK_BITS;
            let stop = end.min(block_start + BLOCK_BITS);

            let low = (position - block_start) as u32;
            let high = (stop - block_start) as u32;
            self.blocks[block as usize] ^= broadword::low_mask(high) & !broadword::low_mask(low);

            position = stop;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        trace!(len = self.len, "clearing bit vector");
        for block in &mut self.blocks {
            *block = 0;
        }
        self.build_index()
    }

    fn resize(&mut self, len: u64) -> Result<()> {
        trace!(from = self.len, to = len, "resizing bit vector");
        self.initialize("BitVector::resize", len)?;
        self.build_index()
    }

    fn extend(&mut self, count: u64) -> Result<()> {
        const WHO: &str = "BitVector::extend";

        let len = self
            .len
            .checked_add(count)
            .ok_or_else(|| errors::overflow(WHO, self.len))?;
        let (block_count, table_len) = layout(WHO, len)?;

        trace!(from = self.len, to = len, "extending bit vector");
        grow_zeroed(WHO, &mut self.blocks, block_count, len)?;
        grow_zeroed(WHO, &mut self.rank_table, table_len, len)?;
        self.len = len;

        self.build_index()
    }
}

impl_index_bit!([] BitVector, access);

impl fmt::Binary for BitVector {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for bit in self {
            formatter.write_str(if bit { "1" } else { "0" })?;
        }

        Ok(())
    }
}

impl SpaceUsage for BitVector {
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        self.blocks.heap_bytes() + self.rank_table.heap_bytes()
    }
}

/// Iterator over a run of the bits of a [`BitVector`](struct.BitVector.html).
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    vector: &'a BitVector,
    start: u64,
    limit: u64,
}

impl<'a> Iterator for Iter<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.start < self.limit {
            let result = self.vector.read_bit(self.start);
            self.start += 1;
            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.limit - self.start) as usize;
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<bool> {
        if self.start < self.limit {
            self.limit -= 1;
            Some(self.vector.read_bit(self.limit))
        } else {
            None
        }
    }
}

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a BitVector {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
