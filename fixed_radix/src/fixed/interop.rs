use core::fmt;

use bytemuck::{Pod, Zeroable};

use super::FixedPoint;
use crate::error::FixedPointError;
use crate::mode::Mode;
use crate::storage::{Int, MathFor};

// Safety: FixedPoint is a transparent wrapper around a Pod integer; the
// PhantomData format marker is zero-sized.
unsafe impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> Zeroable for FixedPoint<M, S, W, C> {}

unsafe impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> Pod for FixedPoint<M, S, W, C> {}

macro_rules! impl_try_from_int {
    ($($t:ty),*) => {$(
        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> TryFrom<$t> for FixedPoint<M, S, W, C> {
            type Error = FixedPointError;

            #[inline]
            fn try_from(value: $t) -> Result<Self, Self::Error> {
                Self::from_int(value)
            }
        }
    )*};
}

impl_try_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> TryFrom<f32> for FixedPoint<M, S, W, C> {
    type Error = FixedPointError;

    #[inline]
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::from_f32(value)
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> TryFrom<f64> for FixedPoint<M, S, W, C> {
    type Error = FixedPointError;

    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> From<FixedPoint<M, S, W, C>> for f64 {
    #[inline]
    fn from(value: FixedPoint<M, S, W, C>) -> f64 {
        value.to_f64()
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> From<FixedPoint<M, S, W, C>> for f32 {
    #[inline]
    fn from(value: FixedPoint<M, S, W, C>) -> f32 {
        value.to_f32()
    }
}

#[cfg(feature = "half_support")]
impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> FixedPoint<M, S, W, C> {
    /// Creates a fixed-point number from a half-precision float.
    ///
    /// # Errors
    ///
    /// Same as [`from_f64`](Self::from_f64).
    pub fn from_f16(value: half::f16) -> Result<Self, FixedPointError> {
        Self::from_f64(value.to_f64())
    }

    /// Rounds to the nearest half-precision float.
    pub fn to_f16(self) -> half::f16 {
        half::f16::from_f64(self.to_f64())
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> fmt::Display for FixedPoint<M, S, W, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> fmt::Debug for FixedPoint<M, S, W, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedPoint")
            .field("raw", &self.raw)
            .field("value", &self.to_f64())
            .finish()
    }
}
