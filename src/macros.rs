//! Macros for export.

/// Implements `SpaceUsage` for a stack-only (`Copy`) type.
///
/// # Example
///
/// ```
/// # #[macro_use] extern crate bit_index;
/// use std::mem;
/// use bit_index::SpaceUsage;
///
/// # #[allow(dead_code)]
/// struct Point { x: u32, y: u32 }
///
/// impl_stack_only_space_usage!(Point);
///
/// fn main() {
///     let point = Point { x: 0, y: 0 };
///     assert_eq!(point.total_bytes(), mem::size_of::<Point>());
/// }
/// ```
#[macro_export]
macro_rules! impl_stack_only_space_usage {
    ( $t:ty ) => {
        impl $crate::SpaceUsage for $t {
            #[inline]
            fn is_stack_only() -> bool {
                true
            }
            #[inline]
            fn heap_bytes(&self) -> usize {
                0
            }
        }
    };
}

/// Forwards the `BitStore` queries of an index to its `store` field.
///
/// Used by the index tiers, which answer `access` and `access_range`
/// straight from the store they wrap.
macro_rules! impl_store_access_adapter {
    ( $store:ident, $field:ident ) => {
        type Bits<'b> = $store::Bits<'b> where Self: 'b;

        fn access(&self, index: u64) -> $crate::errors::Result<bool> {
            self.$field.get_bit(index)
        }

        fn access_range(&self, offset: u64, count: u64) -> $crate::errors::Result<Self::Bits<'_>> {
            self.$field.bits(offset, count)
        }
    };
}

/// Implements `Index<u64>` in terms of a `get_bit`-style method.
macro_rules! impl_index_bit {
    ( [ $($generics:tt)* ] $ty:ty, $get:ident ) => {
        impl<$($generics)*> ::std::ops::Index<u64> for $ty {
            type Output = bool;

            fn index(&self, index: u64) -> &bool {
                $crate::storage::bit_ref(self.$get(index))
            }
        }
    };
}
