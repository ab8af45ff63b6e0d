//! Uniform bit views over externally owned, bit-packed data.
//!
//! A [`BitStore`](trait.BitStore.html) hands out single bits, lazy runs of
//! bits, and aligned 64-bit chunks. The read-only indexes in
//! [`bit_index`](../bit_index/index.html) are generic over it, so the same
//! rank/select algorithm runs over every encoding:
//!
//!   - [`BoolStore`](struct.BoolStore.html): one `bool` per bit;
//!   - [`U32Store`](type.U32Store.html): `u32` words, most significant bit
//!     first;
//!   - [`U64Store`](type.U64Store.html): `u64` words, most significant bit
//!     first.
//!
//! Every chunk returned by `get_aligned_u64` is MSB-first: the bit at
//! `index` sits in bit 63 and later bits follow towards bit 0.
//!
//! ```
//! use bit_index::storage::{BitStore, U32Store};
//!
//! let store = U32Store::new(vec![0x8000_0001u32, 0xFFFF_0000]);
//! assert_eq!(64, store.bit_len());
//! assert!(store[0]);
//! assert!(!store[1]);
//! assert!(store[31]);
//! assert_eq!(0x8000_0001_FFFF_0000, store.get_aligned_u64(0).unwrap());
//! ```

use crate::errors::Result;

mod word;
pub use self::word::PackedWord;

mod bools;
pub use self::bools::*;

mod words;
pub use self::words::*;

/// Read access to a sequence of bits stored elsewhere.
pub trait BitStore {
    /// The native width of one stored element, in bits.
    const WORD_BITS: u64;

    /// Lazy iterator over a run of bits.
    type Bits<'a>: Iterator<Item = bool>
    where
        Self: 'a;

    /// The number of addressable bits.
    fn bit_len(&self) -> u64;

    /// The number of 64-bit chunks covering the bits.
    fn chunk_len(&self) -> u64 {
        let len = self.bit_len();
        len / 64 + u64::from(len % 64 != 0)
    }

    /// Gets the bit at `index`.
    ///
    /// # Errors
    ///
    /// Range error if `index >= self.bit_len()`; overflow error if the
    /// index cannot address the backing sequence.
    fn get_bit(&self, index: u64) -> Result<bool>;

    /// Iterates over the `count` bits starting at `offset`.
    ///
    /// # Errors
    ///
    /// Logic error if `count == 0`; range error if the span runs past
    /// `self.bit_len()`.
    fn bits(&self, offset: u64, count: u64) -> Result<Self::Bits<'_>>;

    /// Gets the 64 bits starting at `index`, MSB-first, padding past the
    /// end with 0s.
    ///
    /// # Errors
    ///
    /// Range error if `index` is not a multiple of `WORD_BITS` or is not
    /// below `self.bit_len()`.
    fn get_aligned_u64(&self, index: u64) -> Result<u64>;
}

impl<'s, S: BitStore> BitStore for &'s S {
    const WORD_BITS: u64 = S::WORD_BITS;

    type Bits<'a> = S::Bits<'a> where Self: 'a;

    #[inline]
    fn bit_len(&self) -> u64 {
        (**self).bit_len()
    }

    #[inline]
    fn get_bit(&self, index: u64) -> Result<bool> {
        (**self).get_bit(index)
    }

    #[inline]
    fn bits(&self, offset: u64, count: u64) -> Result<Self::Bits<'_>> {
        (**self).bits(offset, count)
    }

    #[inline]
    fn get_aligned_u64(&self, index: u64) -> Result<u64> {
        (**self).get_aligned_u64(index)
    }
}

/// Turns the outcome of a bit read into a reference for `Index`.
///
/// # Panics
///
/// Panics with the error message if the read failed.
pub(crate) fn bit_ref(bit: Result<bool>) -> &'static bool {
    match bit {
        Ok(true) => &true,
        Ok(false) => &false,
        Err(err) => panic!("{}", err),
    }
}

impl_index_bit!([D: AsRef<[bool]>] BoolStore<D>, get_bit);
impl_index_bit!([D: AsRef<[W]>, W: PackedWord] WordStore<D, W>, get_bit);
