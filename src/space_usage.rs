//! A trait for computing space usage.

use std::mem;

/// Computes the space usage of an object.
///
/// Space is split into a stack portion (`stack_bytes`), the statically
/// known size of the value itself, and a heap portion (`heap_bytes`), the
/// memory it owns. A summary table of an index is heap memory; a borrowed
/// slice handed to a store is not, since the store does not own it.
pub trait SpaceUsage: Sized {
    /// Computes the size of the receiver in bytes.
    ///
    /// The default implementation returns
    /// `Self::stack_bytes() + self.heap_bytes()`.
    #[inline]
    fn total_bytes(&self) -> usize {
        Self::stack_bytes() + self.heap_bytes()
    }

    /// Is the size of this type known statically?
    ///
    /// If this method returns true then `heap_bytes` should always
    /// return 0.
    fn is_stack_only() -> bool;

    /// Calculates the stack portion of the size of this type.
    ///
    /// The default implementation returns `std::mem::size_of::<Self>()`.
    #[inline]
    fn stack_bytes() -> usize {
        mem::size_of::<Self>()
    }

    /// Calculates the heap portion of the size of an object.
    fn heap_bytes(&self) -> usize;
}

impl_stack_only_space_usage!(bool);
impl_stack_only_space_usage!(u16);
impl_stack_only_space_usage!(u32);
impl_stack_only_space_usage!(u64);
impl_stack_only_space_usage!(usize);

impl<'a, T> SpaceUsage for &'a T {
    fn is_stack_only() -> bool {
        true
    }
    fn heap_bytes(&self) -> usize {
        0
    }
}

impl<'a, T> SpaceUsage for &'a [T] {
    fn is_stack_only() -> bool {
        true
    }
    fn heap_bytes(&self) -> usize {
        0
    }
}

impl<A: SpaceUsage> SpaceUsage for Vec<A> {
    #[inline]
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        let mut result = self.capacity() * A::stack_bytes();

        if !A::is_stack_only() {
            for each in self {
                result += each.heap_bytes();
            }
        }

        result
    }
}
