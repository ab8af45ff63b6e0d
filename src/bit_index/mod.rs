//! Read-only rank/select indexes over externally owned bits.
//!
//! Both tiers wrap a [`BitStore`](../storage/trait.BitStore.html), read
//! it one aligned 64-bit chunk at a time, and never modify it:
//!
//!   - [`BitIndex`](struct.BitIndex.html) keeps one cumulative count per
//!     [`GROUP_BLOCKS`](constant.GROUP_BLOCKS.html) blocks and scans the
//!     blocks of a group linearly;
//!   - [`LargeBitIndex`](struct.LargeBitIndex.html) keeps one count per
//!     [`LARGE_GROUP_BLOCKS`](constant.LARGE_GROUP_BLOCKS.html) blocks
//!     plus a 16-bit running count per block, so rank is a table lookup
//!     and select binary searches within the group.
//!
//! An index is only as fresh as its last `build_index`; changing the
//! store through `inner_mut` requires a rebuild.
//!
//! ```
//! use bit_index::{BitIndex, LargeBitIndex, RankSelect, U32Store};
//!
//! let words = [0xF000_0000u32, 0x0000_0001];
//! let index = BitIndex::build(U32Store::new(&words[..])).unwrap();
//! assert_eq!(4, index.rank1(32).unwrap());
//! assert_eq!(63, index.select1(5).unwrap());
//!
//! let large = LargeBitIndex::build(U32Store::new(&words[..])).unwrap();
//! assert_eq!(4, large.select0(1).unwrap());
//! ```

use crate::BLOCK_BITS;

/// Blocks per rank-table entry of the standard tier.
pub const GROUP_BLOCKS: usize = 4;

/// Bits per rank-table entry of the standard tier.
pub const GROUP_BITS: u64 = GROUP_BLOCKS as u64 * BLOCK_BITS;

/// Blocks per rank-table entry of the large tier.
pub const LARGE_GROUP_BLOCKS: usize = 1024;

/// Bits per rank-table entry of the large tier.
pub const LARGE_GROUP_BITS: u64 = LARGE_GROUP_BLOCKS as u64 * BLOCK_BITS;

mod standard;
pub use self::standard::BitIndex;

mod large;
pub use self::large::LargeBitIndex;
