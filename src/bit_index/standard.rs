use tracing::debug;

use super::{GROUP_BITS, GROUP_BLOCKS};
use crate::bit_vec::RankSelect;
use crate::broadword;
use crate::errors::{self, Result};
use crate::internal::{grow_zeroed, select_group, table_layout, to_index};
use crate::space_usage::SpaceUsage;
use crate::storage::BitStore;
use crate::BLOCK_BITS;

/// A rank/select index over a [`BitStore`](../storage/trait.BitStore.html)
/// with one cumulative count per group of four blocks.
///
/// # Examples
///
/// ```
/// use bit_index::{BitIndex, BoolStore, RankSelect};
///
/// let bits = [true, false, true, true, false];
/// let index = BitIndex::build(BoolStore::new(&bits[..])).unwrap();
///
/// assert_eq!(3, index.total_pop_count());
/// assert_eq!(2, index.rank1(3).unwrap());
/// assert_eq!(3, index.select1(3).unwrap());
/// assert_eq!(4, index.select0(2).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct BitIndex<S> {
    store: S,
    rank_table: Vec<u64>,
    len: u64,
    total_pop_count: u64,
}

impl<S: BitStore> BitIndex<S> {
    /// Wraps `store` without indexing it.
    ///
    /// The index reports length 0 until `build_index` is called.
    pub fn new(store: S) -> Self {
        BitIndex {
            store,
            rank_table: vec![0],
            len: 0,
            total_pop_count: 0,
        }
    }

    /// Wraps and indexes `store`.
    pub fn build(store: S) -> Result<Self> {
        let mut result = BitIndex::new(store);
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
        let group = block / GROUP_BLOCKS as u64;

        let mut result = self.rank_table[group as usize];
        for each in group * GROUP_BLOCKS as u64..block {
            result += u64::from(broadword::count_ones(self.chunk(each)?));
        }

        let within = (count % BLOCK_BITS) as u32;
        if within > 0 {
            result += u64::from(broadword::rank_msb(self.chunk(block)?, within, true));
        }

        Ok(result)
    }
}

impl<S: BitStore> RankSelect for BitIndex<S> {
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
        const WHO: &str = "BitIndex::rank";

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
        const WHO: &str = "BitIndex::select";

        if rank == 0 {
            return errors::not_positive(WHO, "rank");
        }
        let available = self.count_of(value);
        if rank > available {
            return errors::rank_too_large(WHO, rank, available);
        }

        let (group, mut remaining) = select_group(&self.rank_table, GROUP_BITS, self.len, value, rank);

        let first = group as u64 * GROUP_BLOCKS as u64;
        let block_count = self.len / BLOCK_BITS + u64::from(self.len % BLOCK_BITS != 0);
        let limit = block_count.min(first + GROUP_BLOCKS as u64);
        for block in first..limit {
            // Chunks are MSB-first; in-word select counts from the LSB.
            let word = broadword::reverse_u64(self.chunk(block)?);
            let count = u64::from(broadword::rank(word, value));
            if remaining <= count {
                let position =
                    block * BLOCK_BITS + u64::from(broadword::select_by(word, value, remaining as u32));
                if position < self.len {
                    return Ok(position);
                }
                break;
            }
            remaining -= count;
        }

        errors::rank_too_large(WHO, rank, available)
    }

    fn build_index(&mut self) -> Result<()> {
        const WHO: &str = "BitIndex::build_index";

        let len = self.store.bit_len();
        let (block_count, group_count) = table_layout(WHO, len, GROUP_BLOCKS as u64)?;

        let mut rank_table = Vec::new();
        grow_zeroed(WHO, &mut rank_table, to_index(WHO, group_count + 1)?, len)?;

        let mut total = 0;
        for block in 0..block_count {
            if block % GROUP_BLOCKS as u64 == 0 {
                rank_table[(block / GROUP_BLOCKS as u64) as usize] = total;
            }
            total += u64::from(broadword::count_ones(self.chunk(block)?));
        }
        rank_table[group_count as usize] = total;

        self.rank_table = rank_table;
        self.len = len;
        self.total_pop_count = total;

        debug!(len, blocks = block_count, total_pop_count = total, "rebuilt bit index");
        Ok(())
    }
}

impl_index_bit!([S: BitStore] BitIndex<S>, access);

impl<S: SpaceUsage> SpaceUsage for BitIndex<S> {
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        self.store.heap_bytes() + self.rank_table.heap_bytes()
    }
}
