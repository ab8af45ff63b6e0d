//! Errors reported by bit vectors, stores and indexes.

use thiserror::Error;

/// The broad class of an [`Error`](enum.Error.html).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// An index, offset or span falls outside the available bits.
    Range,
    /// A precondition other than bounds was violated, such as a zero
    /// count or a rank larger than the number of matching bits.
    Logic,
    /// A length or a derived table size cannot be represented. The
    /// chosen storage or index is unsuitable for the data size.
    Overflow,
}

/// An error from a bit vector, store or index operation.
///
/// Every variant names the operation that detected it.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// `index` is not below `len`.
    #[error("{who}: index {index} is out of range for length {len}")]
    OutOfRange {
        /// The failing operation.
        who: &'static str,
        /// The offending index or span end.
        index: u64,
        /// The number of addressable bits.
        len: u64,
    },

    /// `index` is not a multiple of the store's native word width.
    #[error("{who}: index {index} must be a multiple of the word width {width}")]
    Misaligned {
        /// The failing operation.
        who: &'static str,
        /// The offending index.
        index: u64,
        /// The native word width in bits.
        width: u64,
    },

    /// A count or rank argument was zero.
    #[error("{who}: {what} must be positive")]
    NotPositive {
        /// The failing operation.
        who: &'static str,
        /// The argument that was zero.
        what: &'static str,
    },

    /// A select asked for more matching bits than exist.
    #[error("{who}: rank {rank} exceeds the {available} matching bits")]
    RankTooLarge {
        /// The failing operation.
        who: &'static str,
        /// The requested rank.
        rank: u64,
        /// The number of bits of the requested value.
        available: u64,
    },

    /// The data is too large for this vector, store or index.
    #[error("{who}: length {len} is too large to index; use a wider store")]
    Overflow {
        /// The failing operation.
        who: &'static str,
        /// The length (or index) that could not be represented.
        len: u64,
    },
}

impl Error {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::OutOfRange { .. } | Error::Misaligned { .. } => ErrorKind::Range,
            Error::NotPositive { .. } | Error::RankTooLarge { .. } => ErrorKind::Logic,
            Error::Overflow { .. } => ErrorKind::Overflow,
        }
    }
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn out_of_range<A>(who: &'static str, index: u64, len: u64) -> Result<A> {
    Err(Error::OutOfRange { who, index, len })
}

pub(crate) fn not_positive<A>(who: &'static str, what: &'static str) -> Result<A> {
    Err(Error::NotPositive { who, what })
}

pub(crate) fn rank_too_large<A>(who: &'static str, rank: u64, available: u64) -> Result<A> {
    Err(Error::RankTooLarge {
        who,
        rank,
        available,
    })
}

pub(crate) fn overflow(who: &'static str, len: u64) -> Error {
    Error::Overflow { who, len }
}
