//! Integer types that can hold raw fixed-point values.
//!
//! [`Int`] covers the signed primitives used both for storage and for
//! intermediate math. [`MathFor`] relates a math type to the storage types
//! it is wide enough for; it only has impls where `bits(W) >= bits(S)`.

use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, Not};

use bytemuck::Pod;

use crate::range::RangeCheck;

mod sealed {
    pub trait Sealed {}
    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for i128 {}
}

/// A signed two's-complement integer usable as fixed-point storage or math.
///
/// Sealed: only `i8`, `i16`, `i32`, `i64` and `i128` implement it.
pub trait Int:
    sealed::Sealed
    + RangeCheck
    + Pod
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + 'static
{
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
    const MIN: Self;
    const MAX: Self;

    fn to_i128(self) -> i128;

    /// Truncating conversion, the same as an `as` cast.
    fn from_i128(value: i128) -> Self;

    fn to_f64(self) -> f64;

    /// Saturating conversion toward zero; NaN becomes zero.
    fn from_f64(value: f64) -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_div(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    fn wrapping_abs(self) -> Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    fn checked_div(self, rhs: Self) -> Option<Self>;

    /// Left shift that yields zero once `count` reaches the bit width.
    fn shift_left(self, count: u32) -> Self;

    /// Arithmetic right shift that yields the sign fill once `count`
    /// reaches the bit width.
    fn shift_right(self, count: u32) -> Self;

    /// Retypes the value, sign-extending when widening and truncating
    /// when narrowing.
    #[inline]
    fn cast<T: Int>(self) -> T {
        T::from_i128(self.to_i128())
    }

    /// The lowest `count` bits set.
    #[inline]
    fn low_mask(count: u32) -> Self {
        Self::ONE.shift_left(count).wrapping_sub(Self::ONE)
    }
}

macro_rules! impl_int {
    ($t:ty) => {
        impl Int for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const NEG_ONE: Self = -1;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn from_i128(value: i128) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn wrapping_div(self, rhs: Self) -> Self {
                <$t>::wrapping_div(self, rhs)
            }

            #[inline]
            fn wrapping_neg(self) -> Self {
                <$t>::wrapping_neg(self)
            }

            #[inline]
            fn wrapping_abs(self) -> Self {
                <$t>::wrapping_abs(self)
            }

            #[inline]
            fn checked_add(self, rhs: Self) -> Option<Self> {
                <$t>::checked_add(self, rhs)
            }

            #[inline]
            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            #[inline]
            fn checked_mul(self, rhs: Self) -> Option<Self> {
                <$t>::checked_mul(self, rhs)
            }

            #[inline]
            fn checked_div(self, rhs: Self) -> Option<Self> {
                <$t>::checked_div(self, rhs)
            }

            #[inline]
            fn shift_left(self, count: u32) -> Self {
                if count >= <$t>::BITS { 0 } else { self << count }
            }

            #[inline]
            fn shift_right(self, count: u32) -> Self {
                if count >= <$t>::BITS {
                    if self < 0 { -1 } else { 0 }
                } else {
                    self >> count
                }
            }
        }
    };
}

impl_int!(i8);
impl_int!(i16);
impl_int!(i32);
impl_int!(i64);
impl_int!(i128);

/// Marks `Self` as wide enough to serve as intermediate math for `S`.
pub trait MathFor<S: Int>: Int {}

macro_rules! impl_math_for {
    ($storage:ty => $($math:ty),+) => {
        $(impl MathFor<$storage> for $math {})+
    };
}

impl_math_for!(i8 => i8, i16, i32, i64, i128);
impl_math_for!(i16 => i16, i32, i64, i128);
impl_math_for!(i32 => i32, i64, i128);
impl_math_for!(i64 => i64, i128);
impl_math_for!(i128 => i128);
