use std::convert::TryFrom;

use tracing::debug;

use super::{LARGE_GROUP_BITS, LARGE_GROUP_BLOCKS};
use crate::bit_vec::RankSelect;
use crate::broadword;
use crate::errors::{self, Result};
use crate::internal::{grow_zeroed, search, select_group, table_layout, to_index};
use crate::space_usage::SpaceUsage;
use crate::storage::BitStore;
use crate::BLOCK_BITS;

/// A rank/select index for large stores, with one cumulative count per
/// group of 1024 blocks and a 16-bit in-group count per block.
///
/// `block_table[b]` holds the ones in the blocks of `b`'s group that
/// come before `b`. It restarts at 0 at every group boundary and never
/// exceeds `1023 * 64`. One trailing entry covers the end of the data.
#[derive(Clone, Debug)]
pub struct LargeBitIndex<S> {
    store: S,
    rank_table: Vec<u64>,
    block_table: Vec<u16>,
    len: u64,
    total_pop_count: u64,
}

impl<S: BitStore> LargeBitIndex<S> {
    /// Wraps `store` without indexing it.
    ///
    /// The index reports length 0 until `build_index` is called.
    pub fn new(store: S) -> Self {
        LargeBitIndex {
            store,
            rank_table: vec![0],
            block_table: vec![0],
            len: 0,
            total_pop_count: 0,
        }
    }

    /// Wraps and indexes `store`.
    pub fn build(store: S) -> Result<Self> {
        let mut result = LargeBitIndex::new(store);
        result.build_index()?;
        Ok(result)
    }

    /// Borrows the store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Mutably borrows the store; rebuild after changing it.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Releases the store, dropping the index.
    pub fn into_inner(self) -> S {
        self.store
    }

    #[inline]
    fn chunk(&self, block: u64) -> Result<u64> {
        self.store.get_aligned_u64(block * BLOCK_BITS)
    }

    fn rank_ones(&self, count: u64) -> Result<u64> {
        let block = count / BLOCK_BITS;
        let group = block / LARGE_GROUP_BLOCKS as u64;

        let mut result =
            self.rank_table[group as usize] + u64::from(self.block_table[block as usize]);

        let within = (count % BLOCK_BITS) as u32;
        if within > 0 {
            result += u64::from(broadword::rank_msb(self.chunk(block)?, within, true));
        }

        Ok(result)
    }
}

impl<S: BitStore> RankSelect for LargeBitIndex<S> {
    impl_store_access_adapter!(S, store);

    #[inline]
    fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    fn total_pop_count(&self) -> u64 {
        self.total_pop_count
    }

    fn rank(&self, value: bool, count: u64) -> Result<u64> {
        const WHO: &str = "LargeBitIndex::rank";

        if count == 0 {
            return errors::not_positive(WHO, "count");
        }
        if count > self.len {
            return errors::out_of_range(WHO, count, self.len);
        }

        let ones = self.rank_ones(count)?;
        Ok(if value {
            ones
        } else {
            count.saturating_sub(ones)
        })
    }

    fn select(&self, value: bool, rank: u64) -> Result<u64> {
        const WHO: &str = "LargeBitIndex::select";

        if rank == 0 {
            return errors::not_positive(WHO, "rank");
        }
        let available = self.count_of(value);
        if rank > available {
            return errors::rank_too_large(WHO, rank, available);
        }

        let (group, remaining) =
            select_group(&self.rank_table, LARGE_GROUP_BITS, self.len, value, rank);

        // The trailing cache entry is not a block.
        let base = group * LARGE_GROUP_BLOCKS;
        let limit = (self.block_table.len() - 1).min(base + LARGE_GROUP_BLOCKS);
        if base >= limit {
            return errors::rank_too_large(WHO, rank, available);
        }

        let table = &self.block_table;
        let cumulative = |block: usize| {
            let ones = u64::from(table[block]);
            if value {
                ones
            } else {
                ((block - base) as u64 * BLOCK_BITS).saturating_sub(ones)
            }
        };

        let block = search::last_below(base, limit, remaining, &cumulative);
        let remaining = remaining.saturating_sub(cumulative(block));

        // Chunks are MSB-first; in-word select counts from the LSB.
        let word = broadword::reverse_u64(self.chunk(block as u64)?);
        if remaining == 0 || remaining > u64::from(broadword::rank(word, value)) {
            return errors::rank_too_large(WHO, rank, available);
        }

        let position =
            block as u64 * BLOCK_BITS + u64::from(broadword::select_by(word, value, remaining as u32));
        if position < self.len {
            Ok(position)
        } else {
            errors::rank_too_large(WHO, rank, available)
        }
    }

    fn build_index(&mut self) -> Result<()> {
        const WHO: &str = "LargeBitIndex::build_index";

        let len = self.store.bit_len();
        let (block_count, group_count) = table_layout(WHO, len, LARGE_GROUP_BLOCKS as u64)?;

        let mut rank_table = Vec::new();
        grow_zeroed(WHO, &mut rank_table, to_index(WHO, group_count + 1)?, len)?;
        let mut block_table = Vec::new();
        grow_zeroed(WHO, &mut block_table, to_index(WHO, block_count + 1)?, len)?;

        let mut total = 0;
        let mut in_group = 0u32;
        for block in 0..block_count {
            if block % LARGE_GROUP_BLOCKS as u64 == 0 {
                rank_table[(block / LARGE_GROUP_BLOCKS as u64) as usize] = total;
                in_group = 0;
            }
            block_table[block as usize] =
                u16::try_from(in_group).map_err(|_| errors::overflow(WHO, len))?;

            let ones = broadword::count_ones(self.chunk(block)?);
            in_group += ones;
            total += u64::from(ones);
        }

        if block_count % LARGE_GROUP_BLOCKS as u64 != 0 {
            block_table[block_count as usize] =
                u16::try_from(in_group).map_err(|_| errors::overflow(WHO, len))?;
        }
        rank_table[group_count as usize] = total;

        self.rank_table = rank_table;
        self.block_table = block_table;
        self.len = len;
        self.total_pop_count = total;

        debug!(len, blocks = block_count, total_pop_count = total, "rebuilt large bit index");
        Ok(())
    }
}

impl_index_bit!([S: BitStore] LargeBitIndex<S>, access);

impl<S: SpaceUsage> SpaceUsage for LargeBitIndex<S> {
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        self.store.heap_bytes() + self.rank_table.heap_bytes() + self.block_table.heap_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bit_index::BitIndex;
    use crate::errors::ErrorKind;
    use crate::storage::{BoolStore, U32Store, U64Store};
    use crate::test_helpers::{check_queries, naive_select, pack_u32, pack_u64, random_bits};

    #[test]
    fn small_example() {
        let pattern: Vec<bool> = "1011001101001100".chars().map(|c| c == '1').collect();
        let index = LargeBitIndex::build(BoolStore::new(&pattern[..])).unwrap();

        assert_eq!(5, index.rank(true, 8).unwrap());
        assert_eq!(3, index.select(true, 3).unwrap());
        assert_eq!(4, index.select(false, 2).unwrap());
        check_queries(&index, &pattern);
    }

    #[test]
    fn adapters_agree() {
        for &(seed, len) in &[(30, 64), (31, 100), (32, 3000)] {
            let data = random_bits(seed, len);

            let bools = LargeBitIndex::build(BoolStore::new(data.clone())).unwrap();
            check_queries(&bools, &data);

            let mut padded = data.clone();
            padded.resize((len + 31) / 32 * 32, false);
            let u32s = LargeBitIndex::build(U32Store::new(pack_u32(&data))).unwrap();
            check_queries(&u32s, &padded);

            padded.resize((len + 63) / 64 * 64, false);
            let u64s = LargeBitIndex::build(U64Store::new(pack_u64(&data))).unwrap();
            check_queries(&u64s, &padded);
        }
    }

    #[test]
    fn crosses_group_boundaries() {
        // Three groups and a partial fourth; the middle group is all ones.
        let blocks = LARGE_GROUP_BLOCKS * 3 + 5;
        let mut words = pack_u64(&random_bits(33, blocks * 64));
        for word in &mut words[LARGE_GROUP_BLOCKS..2 * LARGE_GROUP_BLOCKS] {
            *word = !0;
        }

        let large = LargeBitIndex::build(U64Store::new(&words[..])).unwrap();
        let standard = BitIndex::build(U64Store::new(&words[..])).unwrap();
        assert_eq!(standard.total_pop_count(), large.total_pop_count());

        let last = large.block_table[2 * LARGE_GROUP_BLOCKS - 1];
        assert_eq!(1023 * 64, last);
        assert_eq!(0, large.block_table[2 * LARGE_GROUP_BLOCKS]);

        for count in (1..=large.len()).step_by(61) {
            assert_eq!(standard.rank1(count).unwrap(), large.rank1(count).unwrap());
            assert_eq!(standard.rank0(count).unwrap(), large.rank0(count).unwrap());
        }
        for rank in (1..=large.total_pop_count()).step_by(59) {
            assert_eq!(standard.select1(rank).unwrap(), large.select1(rank).unwrap());
        }
        for rank in (1..=large.count_of(false)).step_by(13) {
            assert_eq!(standard.select0(rank).unwrap(), large.select0(rank).unwrap());
        }
    }

    #[test]
    fn exact_group_multiple() {
        let data = random_bits(34, LARGE_GROUP_BLOCKS * 64);
        let index = LargeBitIndex::build(BoolStore::new(&data[..])).unwrap();

        assert_eq!(LARGE_GROUP_BLOCKS + 1, index.block_table.len());
        assert_eq!(2, index.rank_table.len());

        let ones = index.total_pop_count();
        assert_eq!(ones, index.rank1(index.len()).unwrap());
        assert_eq!(naive_select(&data, true, ones), index.select1(ones).unwrap());
        assert_eq!(ErrorKind::Logic, index.select1(ones + 1).unwrap_err().kind());
    }

    #[test]
    fn unbuilt_and_rebuilt() {
        let mut index = LargeBitIndex::new(U64Store::new(vec![0u64, 0]));
        assert!(index.is_empty());
        assert_eq!(ErrorKind::Logic, index.rank0(0).unwrap_err().kind());
        assert_eq!(ErrorKind::Range, index.rank0(1).unwrap_err().kind());

        index.build_index().unwrap();
        assert_eq!(127, index.select0(128).unwrap());

        index.inner_mut().get_mut()[1] = 1;
        index.build_index().unwrap();
        assert_eq!(127, index.select1(1).unwrap());
        assert_eq!(126, index.select0(127).unwrap());
    }

    #[test]
    fn empty_store() {
        let words: [u32; 0] = [];
        let index = LargeBitIndex::build(U32Store::new(&words[..])).unwrap();
        assert_eq!(0, index.len());
        assert_eq!(ErrorKind::Range, index.rank1(1).unwrap_err().kind());
        assert_eq!(ErrorKind::Logic, index.select0(1).unwrap_err().kind());
    }

    #[test]
    fn space_overhead() {
        let words = vec![0u64; 1 << 12];
        let index = LargeBitIndex::build(U64Store::new(words)).unwrap();
        let tables = index.rank_table.heap_bytes() + index.block_table.heap_bytes();
        assert!(tables * 3 < index.inner().heap_bytes());
    }
}
