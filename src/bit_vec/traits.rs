use crate::errors::{self, Result};
use crate::internal::check_span;

/// Read-only access, rank and select over a sequence of bits.
///
/// Rank and select answer from summary tables that are only as fresh as
/// the last call to [`build_index`](#tymethod.build_index). Counts are
/// 1-based (`rank(v, n)` counts the first `n` bits, `select(v, 1)` finds
/// the first `v`-bit) and positions are 0-based.
pub trait RankSelect {
    /// Lazy iterator over a run of bits.
    type Bits<'a>: Iterator<Item = bool>
    where
        Self: 'a;

    /// The number of bits.
    fn len(&self) -> u64;

    /// Is the sequence empty?
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of 1 bits as of the last index build.
    fn total_pop_count(&self) -> u64;

    /// The number of bits equal to `value` as of the last index build.
    fn count_of(&self, value: bool) -> u64 {
        if value {
            self.total_pop_count()
        } else {
            self.len().saturating_sub(self.total_pop_count())
        }
    }

    /// Gets the bit at `index`.
    fn access(&self, index: u64) -> Result<bool>;

    /// Iterates over the `count` bits starting at `offset`.
    ///
    /// # Errors
    ///
    /// Logic error if `count == 0`; range error if the span runs past the
    /// end.
    fn access_range(&self, offset: u64, count: u64) -> Result<Self::Bits<'_>>;

    /// Counts the bits equal to `value` among the first `count` bits.
    ///
    /// # Errors
    ///
    /// Logic error if `count == 0`; range error if `count > self.len()`.
    fn rank(&self, value: bool, count: u64) -> Result<u64>;

    /// Counts the bits equal to `value` in `offset .. offset + count`.
    ///
    /// # Errors
    ///
    /// Logic error if `count == 0`; range error if the span runs past the
    /// end.
    fn rank_range(&self, value: bool, count: u64, offset: u64) -> Result<u64> {
        let end = check_span("RankSelect::rank_range", offset, count, self.len())?;

        let ones = if offset == 0 {
            self.rank(true, end)?
        } else {
            // Stale tables need not be monotone; never underflow.
            self.rank(true, end)?.saturating_sub(self.rank(true, offset)?)
        };

        Ok(if value {
            ones
        } else {
            count.saturating_sub(ones)
        })
    }

    /// Finds the position of the `rank`th bit equal to `value`.
    ///
    /// # Errors
    ///
    /// Logic error if `rank == 0` or if there are fewer than `rank` such
    /// bits.
    fn select(&self, value: bool, rank: u64) -> Result<u64>;

    /// Finds the position of the `rank`th bit equal to `value` at or after
    /// `offset`.
    ///
    /// # Errors
    ///
    /// Logic error if `rank == 0` or if there are fewer than `rank` such
    /// bits from `offset` on; range error if `offset + rank` exceeds the
    /// length.
    fn select_from(&self, value: bool, rank: u64, offset: u64) -> Result<u64> {
        const WHO: &str = "RankSelect::select_from";

        if rank == 0 {
            return errors::not_positive(WHO, "rank");
        }

        match offset.checked_add(rank) {
            Some(end) if end <= self.len() => (),
            Some(end) => return errors::out_of_range(WHO, end, self.len()),
            None => return errors::out_of_range(WHO, !0, self.len()),
        }

        let available = self.count_of(value);
        if rank > available {
            return errors::rank_too_large(WHO, rank, available);
        }

        if offset == 0 {
            return self.select(value, rank);
        }

        let total = self.rank(value, offset)? + rank;
        if total > available {
            return errors::rank_too_large(WHO, total, available);
        }

        self.select(value, total)
    }

    /// Recomputes the summary tables from the current bits.
    fn build_index(&mut self) -> Result<()>;

    /// Counts the 1 bits among the first `count` bits.
    fn rank1(&self, count: u64) -> Result<u64> {
        self.rank(true, count)
    }

    /// Counts the 0 bits among the first `count` bits.
    fn rank0(&self, count: u64) -> Result<u64> {
        self.rank(false, count)
    }

    /// Finds the position of the `rank`th 1 bit.
    fn select1(&self, rank: u64) -> Result<u64> {
        self.select(true, rank)
    }

    /// Finds the position of the `rank`th 0 bit.
    fn select0(&self, rank: u64) -> Result<u64> {
        self.select(false, rank)
    }
}

/// In-place mutation of a [`RankSelect`](trait.RankSelect.html) bit
/// sequence.
///
/// The bit mutators never touch the summary tables; batch them, then call
/// `build_index` before trusting `rank` or `select` again. The resizing
/// operations rebuild on their own.
pub trait RankSelectMut: RankSelect {
    /// Sets the bit at `index` to `value`.
    fn set(&mut self, index: u64, value: bool) -> Result<()>;

    /// Overwrites the bits starting at `index` with `values`.
    ///
    /// # Errors
    ///
    /// Logic error if `values` is empty; range error if the span runs past
    /// the end.
    fn set_range(&mut self, index: u64, values: &[bool]) -> Result<()>;

    /// Flips the bit at `index`.
    fn toggle(&mut self, index: u64) -> Result<()>;

    /// Flips the `count` bits starting at `offset`.
    ///
    /// # Errors
    ///
    /// Logic error if `count == 0`; range error if the span runs past the
    /// end.
    fn toggle_range(&mut self, offset: u64, count: u64) -> Result<()>;

    /// Clears every bit, keeping the length.
    fn clear(&mut self) -> Result<()>;

    /// Discards every bit and starts over with `len` clear bits.
    fn resize(&mut self, len: u64) -> Result<()>;

    /// Appends `count` clear bits, keeping the existing ones.
    fn extend(&mut self, count: u64) -> Result<()>;
}
