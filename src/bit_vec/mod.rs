//! Rank/select interfaces and the owned, mutable bit vector.

mod traits;
pub use self::traits::*;

mod bit_vector;
pub use self::bit_vector::*;
