use std::iter::Copied;
use std::slice;

use super::BitStore;
use crate::broadword;
use crate::errors::{self, Result};
use crate::internal::{check_span, to_index};
use crate::space_usage::SpaceUsage;

/// A bit store with one `bool` per bit.
///
/// `D` is anything that derefs to a `[bool]`: a borrowed slice leaves the
/// data with its owner, a `Vec<bool>` moves it into the store.
#[derive(Clone, Debug)]
pub struct BoolStore<D> {
    data: D,
}

impl<D: AsRef<[bool]>> BoolStore<D> {
    /// Wraps `data`.
    pub fn new(data: D) -> Self {
        BoolStore { data }
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
}

impl<D: AsRef<[bool]>> BitStore for BoolStore<D> {
    const WORD_BITS: u64 = 1;

    type Bits<'a> = Copied<slice::Iter<'a, bool>> where Self: 'a;

    #[inline]
    fn bit_len(&self) -> u64 {
        self.data.as_ref().len() as u64
    }

    fn get_bit(&self, index: u64) -> Result<bool> {
        let position = to_index("BoolStore::get_bit", index)?;
        match self.data.as_ref().get(position) {
            Some(&bit) => Ok(bit),
            None => errors::out_of_range("BoolStore::get_bit", index, self.bit_len()),
        }
    }

    fn bits(&self, offset: u64, count: u64) -> Result<Self::Bits<'_>> {
        let end = check_span("BoolStore::bits", offset, count, self.bit_len())?;
        let start = to_index("BoolStore::bits", offset)?;
        let end = to_index("BoolStore::bits", end)?;
        Ok(self.data.as_ref()[start..end].iter().copied())
    }

    fn get_aligned_u64(&self, index: u64) -> Result<u64> {
        let position = to_index("BoolStore::get_aligned_u64", index)?;
        if index >= self.bit_len() {
            return errors::out_of_range("BoolStore::get_aligned_u64", index, self.bit_len());
        }
        Ok(broadword::pack_bools(self.data.as_ref(), position))
    }
}

impl<D: SpaceUsage> SpaceUsage for BoolStore<D> {
    fn is_stack_only() -> bool {
        D::is_stack_only()
    }

    fn heap_bytes(&self) -> usize {
        self.data.heap_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn access() {
        let bits = [true, false, true, true];
        let store = BoolStore::new(&bits[..]);

        assert_eq!(4, store.bit_len());
        assert_eq!(Ok(true), store.get_bit(0));
        assert_eq!(Ok(false), store.get_bit(1));
        assert!(store[3]);
        assert_eq!(ErrorKind::Range, store.get_bit(4).unwrap_err().kind());
    }

    #[test]
    fn bits_range() {
        let store = BoolStore::new(vec![true, false, true, true, false]);
        let run: Vec<bool> = store.bits(1, 3).unwrap().collect();
        assert_eq!(vec![false, true, true], run);

        assert_eq!(ErrorKind::Logic, store.bits(1, 0).unwrap_err().kind());
        assert_eq!(ErrorKind::Range, store.bits(3, 3).unwrap_err().kind());
    }

    #[test]
    fn aligned_chunks_pad_with_zeros() {
        let store = BoolStore::new(vec![true, false, true]);
        assert_eq!(1, store.chunk_len());
        assert_eq!(0b101 << 61, store.get_aligned_u64(0).unwrap());
        assert_eq!(1 << 63, store.get_aligned_u64(2).unwrap());
        assert_eq!(
            ErrorKind::Range,
            store.get_aligned_u64(3).unwrap_err().kind()
        );
    }

    #[test]
    fn releases_data() {
        let mut store = BoolStore::new(vec![false; 3]);
        store.get_mut()[1] = true;
        assert_eq!(vec![false, true, false], store.into_inner());
    }
}
