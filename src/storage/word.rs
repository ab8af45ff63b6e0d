use std::fmt;

use num_traits::PrimInt;

use crate::broadword;

/// Word types that a [`WordStore`](struct.WordStore.html) can pack bits
/// into, most significant bit first.
pub trait PackedWord: PrimInt + fmt::Debug {
    /// The number of bits in a word.
    const BITS: u64;

    /// Reverses the bit order of the word.
    fn reverse(self) -> Self;

    /// Assembles the 64-bit chunk that starts at word `index`, which must
    /// be in bounds.
    fn chunk_at(words: &[Self], index: usize) -> u64;

    /// Extracts the bit `offset` places from the most significant end.
    #[inline]
    fn msb_bit(self, offset: u64) -> bool {
        debug_assert!(offset < Self::BITS);
        (self >> (Self::BITS - 1 - offset) as usize) & Self::one() != Self::zero()
    }
}

impl PackedWord for u32 {
    const BITS: u64 = 32;

    #[inline]
    fn reverse(self) -> Self {
        broadword::reverse_u32(self)
    }

    #[inline]
    fn chunk_at(words: &[Self], index: usize) -> u64 {
        broadword::pack_u32_pair(words, index)
    }
}

impl PackedWord for u64 {
    const BITS: u64 = 64;

    #[inline]
    fn reverse(self) -> Self {
        broadword::reverse_u64(self)
    }

    #[inline]
    fn chunk_at(words: &[Self], index: usize) -> u64 {
        words[index]
    }
}
