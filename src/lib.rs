//! Succinct rank/select bit vectors and bit indexes.
//!
//! This library answers three queries over a sequence of bits in
//! near-constant time, using summary tables much smaller than the bits:
//!
//!   - *access*: the bit at a position;
//!   - *rank*: how many 0s or 1s occur in a prefix or a sub-range;
//!   - *select*: the position of the *k*th 0 or 1.
//!
//! There are two ways in:
//!
//!   - [`BitVector`](bit_vec/struct.BitVector.html) owns its bits and
//!     supports mutation. Mutators leave the summary tables alone, so
//!     batch your edits and then call `build_index`.
//!   - [`BitIndex`](bit_index/struct.BitIndex.html) and
//!     [`LargeBitIndex`](bit_index/struct.LargeBitIndex.html) attach
//!     rank/select to bits you already have, through a
//!     [`BitStore`](storage/trait.BitStore.html) adapter over `bool`s,
//!     `u32`s or `u64`s. They never copy or modify the data.
//!
//! Counts are 1-based and positions are 0-based: `rank1(n)` counts the
//! ones among the first `n` bits and `select1(k)` is the position of the
//! `k`th one.
//!
//! # Usage
//!
//! ```
//! use bit_index::{BitIndex, BitVector, RankSelect, RankSelectMut, U64Store};
//!
//! let mut bits = BitVector::new(1000).unwrap();
//! for i in (0..1000).step_by(10) {
//!     bits.set(i, true).unwrap();
//! }
//! bits.build_index().unwrap();
//! assert_eq!(100, bits.total_pop_count());
//! assert_eq!(50, bits.rank1(491).unwrap());
//! assert_eq!(490, bits.select1(50).unwrap());
//!
//! let words = [0x8000_0000_0000_0001u64, 0];
//! let index = BitIndex::build(U64Store::new(&words[..])).unwrap();
//! assert_eq!(2, index.rank1(64).unwrap());
//! assert_eq!(63, index.select1(2).unwrap());
//! ```
//!
//! Failures are reported as [`Error`](errors/enum.Error.html)s, which
//! classify as range, logic or overflow errors.

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod internal;

pub mod broadword;

pub mod errors;
pub use errors::{Error, ErrorKind, Result};

mod space_usage;
pub use space_usage::SpaceUsage;

pub mod storage;
pub use storage::{BitStore, BoolStore, U32Store, U64Store, WordStore};

pub mod bit_vec;
pub use bit_vec::{BitVector, RankSelect, RankSelectMut};

pub mod bit_index;
pub use bit_index::{BitIndex, LargeBitIndex};

/// Bits per block, the unit every summary table counts in.
pub const BLOCK_BITS: u64 = 64;

#[cfg(test)]
mod test_helpers;
