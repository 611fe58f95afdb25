use std::fmt::{Debug, Display};

use num_traits::Num;

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Every implementor is a
/// plain `Copy` primitive, which is what lets both trees store split values inline in their
/// nodes and compare them without allocation.
pub trait IndexableNum:
    private::Sealed
    + Num
    + PartialOrd
    + Copy
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
    /// Returns `true` if this value can be ordered against itself.
    ///
    /// Only floating point NaN fails this check.
    #[inline]
    fn is_ordered(&self) -> bool {
        self.partial_cmp(self).is_some()
    }
}

impl IndexableNum for i8 {}
impl IndexableNum for u8 {}
impl IndexableNum for i16 {}
impl IndexableNum for u16 {}
impl IndexableNum for i32 {}
impl IndexableNum for u32 {}
impl IndexableNum for i64 {}
impl IndexableNum for f32 {}
impl IndexableNum for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
