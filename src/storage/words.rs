use std::convert::TryFrom;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{BitStore, PackedWord};
use crate::errors::{self, Error, Result};
use crate::internal::{check_span, to_index};
use crate::space_usage::SpaceUsage;

/// A bit store over a sequence of words, each packed most significant bit
/// first: bit `i` lives in word `i / W::BITS`, at `i % W::BITS` places from
/// the top.
///
/// Construct through the [`U32Store`](type.U32Store.html) and
/// [`U64Store`](type.U64Store.html) aliases.
#[derive(Clone, Debug)]
pub struct WordStore<D, W> {
    data: D,
    word: PhantomData<W>,
}

/// A store over `u32` words. Chunks of 64 bits join two words, the first
/// in the high half.
pub type U32Store<D> = WordStore<D, u32>;

/// A store over `u64` words, each already a 64-bit chunk.
pub type U64Store<D> = WordStore<D, u64>;

impl<D: AsRef<[W]>, W: PackedWord> WordStore<D, W> {
    /// Wraps `data`.
    pub fn new(data: D) -> Self {
        WordStore {
            data,
            word: PhantomData,
        }
    }

    /// Borrows the wrapped data.
    pub fn get_ref(&self) -> &D {
        &self.data
    }

    /// Mutably borrows the wrapped data.
    ///
    /// Any index built over this store must be rebuilt after a change.
    pub fn get_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Releases the wrapped data.
    pub fn into_inner(self) -> D {
        self.data
    }

    #[inline]
    fn words(&self) -> &[W] {
        self.data.as_ref()
    }

    /// Finds the word holding bit `index`, failing if it does not exist.
    fn word_index(&self, who: &'static str, index: u64) -> Result<usize> {
        let word = to_index(who, index / W::BITS)?;
        if word < self.words().len() {
            Ok(word)
        } else {
            errors::out_of_range(who, index, self.bit_len())
        }
    }
}

impl<D: AsRef<[W]>, W: PackedWord> BitStore for WordStore<D, W> {
    const WORD_BITS: u64 = W::BITS;

    type Bits<'a> = WordBits<'a, W> where Self: 'a;

    #[inline]
    fn bit_len(&self) -> u64 {
        self.words().len() as u64 * W::BITS
    }

    fn get_bit(&self, index: u64) -> Result<bool> {
        let word = self.word_index("WordStore::get_bit", index)?;
        Ok(self.words()[word].msb_bit(index % W::BITS))
    }

    fn bits(&self, offset: u64, count: u64) -> Result<Self::Bits<'_>> {
        check_span("WordStore::bits", offset, count, self.bit_len())?;
        let word = self.word_index("WordStore::bits", offset)?;
        Ok(WordBits::new(self.words(), word, (offset % W::BITS) as u32, count))
    }

    fn get_aligned_u64(&self, index: u64) -> Result<u64> {
        if index % W::BITS != 0 {
            return Err(Error::Misaligned {
                who: "WordStore::get_aligned_u64",
                index,
                width: W::BITS,
            });
        }

        let word = self.word_index("WordStore::get_aligned_u64", index)?;
        Ok(W::chunk_at(self.words(), word))
    }
}

impl<D: SpaceUsage, W> SpaceUsage for WordStore<D, W> {
    fn is_stack_only() -> bool {
        D::is_stack_only()
    }

    fn heap_bytes(&self) -> usize {
        self.data.heap_bytes()
    }
}

/// Iterator over a run of bits in a [`WordStore`](struct.WordStore.html).
///
/// Each word is bit-reversed once when it is reached, so the bits come
/// off the low end by shifting.
#[derive(Clone, Debug)]
pub struct WordBits<'a, W> {
    words: &'a [W],
    next_word: usize,
    current: W,
    left_in_word: u32,
    remaining: u64,
}

impl<'a, W: PackedWord> WordBits<'a, W> {
    fn new(words: &'a [W], word: usize, skip: u32, count: u64) -> Self {
        let first = words.get(word).copied().unwrap_or_else(W::zero);
        WordBits {
            words,
            next_word: word + 1,
            current: first.reverse() >> skip as usize,
            left_in_word: W::BITS as u32 - skip,
            remaining: count,
        }
    }
}

impl<'a, W: PackedWord> Iterator for WordBits<'a, W> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            return None;
        }

        if self.left_in_word == 0 {
            let word = self.words.get(self.next_word).copied()?;
            self.current = word.reverse();
            self.next_word += 1;
            self.left_in_word = W::BITS as u32;
        }

        let bit = self.current & W::one() != W::zero();
        self.current = self.current >> 1;
        self.left_in_word -= 1;
        self.remaining -= 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<'a, W: PackedWord> FusedIterator for WordBits<'a, W> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn u32_access_is_msb_first() {
        let store = U32Store::new(vec![0b101u32 << 29, 1]);

        assert_eq!(64, store.bit_len());
        assert!(store[0]);
        assert!(!store[1]);
        assert!(store[2]);
        assert!(!store[31]);
        assert!(!store[32]);
        assert!(store[63]);
        assert_eq!(ErrorKind::Range, store.get_bit(64).unwrap_err().kind());
    }

    #[test]
    fn u32_chunks() {
        let store = U32Store::new(vec![0xAAAA_AAAAu32, 0x5555_5555, 0xF000_0000]);

        assert_eq!(0xAAAA_AAAA_5555_5555, store.get_aligned_u64(0).unwrap());
        assert_eq!(0x5555_5555_F000_0000, store.get_aligned_u64(32).unwrap());
        assert_eq!(0xF000_0000_0000_0000, store.get_aligned_u64(64).unwrap());

        assert_eq!(ErrorKind::Range, store.get_aligned_u64(16).unwrap_err().kind());
        assert_eq!(ErrorKind::Range, store.get_aligned_u64(96).unwrap_err().kind());
    }

    #[test]
    fn u64_chunks() {
        let words = [1u64 << 63, 3];
        let store = U64Store::new(&words[..]);

        assert!(store[0]);
        assert!(store[126]);
        assert!(store[127]);
        assert_eq!(3, store.get_aligned_u64(64).unwrap());
        match store.get_aligned_u64(32) {
            Err(Error::Misaligned { index, width, .. }) => {
                assert_eq!(32, index);
                assert_eq!(64, width);
            }
            other => panic!("expected misalignment, got {:?}", other),
        }
    }

    #[test]
    fn bits_cross_word_boundaries() {
        let store = U32Store::new(vec![0x0000_0003u32, 0xC000_0000]);
        let run: Vec<bool> = store.bits(29, 6).unwrap().collect();
        assert_eq!(vec![false, true, true, true, true, false], run);

        let store = U64Store::new(vec![1u64, 1 << 63]);
        let run: Vec<bool> = store.bits(62, 3).unwrap().collect();
        assert_eq!(vec![false, true, true], run);
    }

    #[test]
    fn bits_match_get_bit() {
        let words = vec![0xDEAD_BEEFu32, 0x0123_4567, 0x89AB_CDEF];
        let store = U32Store::new(&words[..]);

        for offset in 0..store.bit_len() {
            let count = store.bit_len() - offset;
            let run: Vec<bool> = store.bits(offset, count).unwrap().collect();
            let expected: Vec<bool> = (offset..store.bit_len())
                .map(|i| store.get_bit(i).unwrap())
                .collect();
            assert_eq!(expected, run);
        }
    }

    #[test]
    fn bits_bounds() {
        let store = U64Store::new(vec![0u64; 2]);
        assert_eq!(ErrorKind::Logic, store.bits(0, 0).unwrap_err().kind());
        assert_eq!(ErrorKind::Range, store.bits(100, 29).unwrap_err().kind());
        assert_eq!(128, store.bits(0, 128).unwrap().count());
    }
}
