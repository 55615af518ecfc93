//! Comparisons against plain numbers.
//!
//! Integers compare exactly: the floor of the fixed value decides, and a
//! nonzero fraction on an equal floor makes the fixed value greater.
//! Floats compare through [`FixedPoint::to_f64`]; NaN is unordered.

use core::cmp::Ordering;

use super::FixedPoint;
use crate::mode::Mode;
use crate::storage::{Int, MathFor};

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> FixedPoint<M, S, W, C> {
    // The arithmetic shift gives the true floor, -1 for negative values
    // when `M < 0`, unlike `floor()`.
    fn cmp_whole(self, rhs: i128) -> Ordering {
        let floor = self.raw.shift_right(Self::RADIX).to_i128();
        match floor.cmp(&rhs) {
            Ordering::Equal if self.raw & S::low_mask(Self::RADIX) != S::ZERO => Ordering::Greater,
            ordering => ordering,
        }
    }
}

macro_rules! impl_int_cmp {
    ($($t:ty),*) => {$(
        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> PartialEq<$t> for FixedPoint<M, S, W, C> {
            #[inline]
            fn eq(&self, other: &$t) -> bool {
                self.cmp_whole(*other as i128) == Ordering::Equal
            }
        }

        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> PartialOrd<$t> for FixedPoint<M, S, W, C> {
            #[inline]
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(self.cmp_whole(*other as i128))
            }
        }

        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> PartialEq<FixedPoint<M, S, W, C>> for $t {
            #[inline]
            fn eq(&self, other: &FixedPoint<M, S, W, C>) -> bool {
                other == self
            }
        }

        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> PartialOrd<FixedPoint<M, S, W, C>> for $t {
            #[inline]
            fn partial_cmp(&self, other: &FixedPoint<M, S, W, C>) -> Option<Ordering> {
                other.partial_cmp(self).map(Ordering::reverse)
            }
        }
    )*};
}

impl_int_cmp!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float_cmp {
    ($($t:ty),*) => {$(
        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> PartialEq<$t> for FixedPoint<M, S, W, C> {
            #[inline]
            fn eq(&self, other: &$t) -> bool {
                self.to_f64() == f64::from(*other)
            }
        }

        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> PartialOrd<$t> for FixedPoint<M, S, W, C> {
            #[inline]
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                self.to_f64().partial_cmp(&f64::from(*other))
            }
        }
    )*};
}

impl_float_cmp!(f32, f64);
