use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use super::FixedPoint;
use crate::error::{reject, FixedPointError, Operation};
use crate::mode::Mode;
use crate::range::RangeCheck;
use crate::storage::{Int, MathFor};

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> FixedPoint<M, S, W, C> {
    /// Adds two values.
    ///
    /// Checked formats sum in the math width and reject a result whose
    /// whole-number part does not fit. Wrapping formats add in storage width.
    ///
    /// # Errors
    ///
    /// `FixedPointError::Overflow` in checked formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_radix::FixedPoint;
    ///
    /// let x = FixedPoint::<8>::from_f64(1.5)?;
    /// let y = FixedPoint::<8>::from_f64(2.5)?;
    /// assert_eq!(x.try_add(y)?.to_f64(), 4.0);
    /// assert!(FixedPoint::<8>::max_value().try_add(y).is_err());
    /// # Ok::<(), fixed_radix::FixedPointError>(())
    /// ```
    pub fn try_add(self, rhs: Self) -> Result<Self, FixedPointError> {
        self.add_raw(rhs.raw, Operation::Add)
    }

    /// Subtracts `rhs`, with the same checking as [`try_add`](Self::try_add).
    pub fn try_sub(self, rhs: Self) -> Result<Self, FixedPointError> {
        if C::CHECKED {
            let difference = self
                .widen()
                .checked_sub(rhs.widen())
                .ok_or_else(|| Self::overflow(Operation::Sub))?;
            Self::narrow(difference, Operation::Sub)
        } else {
            Ok(Self::from_raw(self.raw.wrapping_sub(rhs.raw)))
        }
    }

    pub(crate) fn add_raw(self, rhs: S, operation: Operation) -> Result<Self, FixedPointError> {
        if C::CHECKED {
            let sum = self
                .widen()
                .checked_add(rhs.cast())
                .ok_or_else(|| Self::overflow(operation))?;
            Self::narrow(sum, operation)
        } else {
            Ok(Self::from_raw(self.raw.wrapping_add(rhs)))
        }
    }

    /// Multiplies two values.
    ///
    /// Both raw values are widened to the math type, multiplied, and shifted
    /// right by the radix to drop the doubled fractional scaling.
    ///
    /// # Errors
    ///
    /// `FixedPointError::Overflow` in checked formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_radix::FixedPoint;
    ///
    /// let x = FixedPoint::<8>::from_int(2)?;
    /// let y = FixedPoint::<8>::from_int(3)?;
    /// assert_eq!(x.try_mul(y)?, FixedPoint::<8>::from_int(6)?);
    /// # Ok::<(), fixed_radix::FixedPointError>(())
    /// ```
    pub fn try_mul(self, rhs: Self) -> Result<Self, FixedPointError> {
        if C::CHECKED {
            let product = self
                .widen()
                .checked_mul(rhs.widen())
                .ok_or_else(|| Self::overflow(Operation::Mul))?;
            Self::narrow(product.shift_right(Self::RADIX), Operation::Mul)
        } else {
            let product = self.widen().wrapping_mul(rhs.widen());
            Ok(Self::from_raw(product.shift_right(Self::RADIX).cast()))
        }
    }

    /// Multiplies by a plain integer. The integer is unscaled, so no
    /// rescaling shift is needed.
    ///
    /// # Errors
    ///
    /// `FixedPointError::Overflow` in checked formats, including when `rhs`
    /// does not fit the math type.
    pub fn try_mul_int<I: RangeCheck>(self, rhs: I) -> Result<Self, FixedPointError> {
        if C::CHECKED {
            if !rhs.fits(I::WHOLE_MAGNITUDE, W::WHOLE_MAGNITUDE) {
                return Err(Self::overflow(Operation::Mul));
            }
            let product = self
                .widen()
                .checked_mul(W::from_i128(rhs.as_i128()))
                .ok_or_else(|| Self::overflow(Operation::Mul))?;
            Self::narrow(product, Operation::Mul)
        } else {
            let product = self.widen().wrapping_mul(W::from_i128(rhs.as_i128()));
            Ok(Self::from_raw(product.cast()))
        }
    }

    /// Divides by `rhs`.
    ///
    /// The dividend is widened and shifted left by the radix before the
    /// integer division so the quotient keeps its fractional bits. The
    /// quotient truncates toward zero.
    ///
    /// # Errors
    ///
    /// `FixedPointError::DivideByZero` in every format when `rhs` is zero,
    /// and `FixedPointError::Overflow` in checked formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_radix::{FixedPoint, FixedPointError};
    ///
    /// let x = FixedPoint::<8>::from_int(7)?;
    /// let y = FixedPoint::<8>::from_int(2)?;
    /// assert_eq!(x.try_div(y)?.to_f64(), 3.5);
    /// assert_eq!(x.try_div(FixedPoint::zero()), Err(FixedPointError::DivideByZero));
    /// # Ok::<(), fixed_radix::FixedPointError>(())
    /// ```
    pub fn try_div(self, rhs: Self) -> Result<Self, FixedPointError> {
        if rhs.raw == S::ZERO {
            return Err(reject(FixedPointError::DivideByZero));
        }
        let dividend = self.widen().shift_left(Self::RADIX);
        if C::CHECKED {
            if dividend.shift_right(Self::RADIX) != self.widen() {
                return Err(Self::overflow(Operation::Div));
            }
            let quotient = dividend
                .checked_div(rhs.widen())
                .ok_or_else(|| Self::overflow(Operation::Div))?;
            Self::narrow(quotient, Operation::Div)
        } else {
            Ok(Self::from_raw(dividend.wrapping_div(rhs.widen()).cast()))
        }
    }

    /// In-place [`try_add`](Self::try_add); `self` is unchanged on error.
    pub fn try_add_assign(&mut self, rhs: Self) -> Result<(), FixedPointError> {
        *self = self.try_add(rhs)?;
        Ok(())
    }

    /// In-place [`try_sub`](Self::try_sub); `self` is unchanged on error.
    pub fn try_sub_assign(&mut self, rhs: Self) -> Result<(), FixedPointError> {
        *self = self.try_sub(rhs)?;
        Ok(())
    }

    /// In-place [`try_mul`](Self::try_mul); `self` is unchanged on error.
    pub fn try_mul_assign(&mut self, rhs: Self) -> Result<(), FixedPointError> {
        *self = self.try_mul(rhs)?;
        Ok(())
    }

    /// In-place [`try_div`](Self::try_div); `self` is unchanged on error.
    pub fn try_div_assign(&mut self, rhs: Self) -> Result<(), FixedPointError> {
        *self = self.try_div(rhs)?;
        Ok(())
    }

    /// Absolute value. Like negation it wraps, so `min_value()` maps to itself.
    pub fn abs(self) -> Self {
        Self::from_raw(self.raw.wrapping_abs())
    }
}

// The operator forms panic on any error the `try_` form reports, the way
// integer overflow does in debug builds. Wrapping formats never overflow.
macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $try_method:ident) => {
        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> $op for FixedPoint<M, S, W, C> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                self.$try_method(rhs).unwrap_or_else(|err| panic!("{}", err))
            }
        }

        impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> $assign_op for FixedPoint<M, S, W, C> {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, try_add);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, try_sub);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, try_mul);
impl_binary_op!(Div, div, DivAssign, div_assign, try_div);

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> Mul<i32> for FixedPoint<M, S, W, C> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        self.try_mul_int(rhs).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> MulAssign<i32> for FixedPoint<M, S, W, C> {
    #[inline]
    fn mul_assign(&mut self, rhs: i32) {
        *self = *self * rhs;
    }
}

/// Negates the raw value directly, wrapping at `min_value()`.
impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> Neg for FixedPoint<M, S, W, C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_raw(self.raw.wrapping_neg())
    }
}

// Shifts act on the raw bits and are never range-checked.
impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> Shl<u32> for FixedPoint<M, S, W, C> {
    type Output = Self;

    #[inline]
    fn shl(self, count: u32) -> Self {
        Self::from_raw(self.raw.shift_left(count))
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> Shr<u32> for FixedPoint<M, S, W, C> {
    type Output = Self;

    #[inline]
    fn shr(self, count: u32) -> Self {
        Self::from_raw(self.raw.shift_right(count))
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> ShlAssign<u32> for FixedPoint<M, S, W, C> {
    #[inline]
    fn shl_assign(&mut self, count: u32) {
        *self = *self << count;
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> ShrAssign<u32> for FixedPoint<M, S, W, C> {
    #[inline]
    fn shr_assign(&mut self, count: u32) {
        *self = *self >> count;
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{FixedPointError, Operation};
    use crate::mode::Wrapping;
    use crate::FixedPoint;

    type Q8 = FixedPoint<8>;
    type Q3 = FixedPoint<3, i16, i32>;
    type WrapQ3 = FixedPoint<3, i16, i32, Wrapping>;

    fn q8(value: f64) -> Q8 {
        Q8::from_f64(value).unwrap()
    }

    #[test]
    fn test_add_sub() {
        assert_eq!((q8(1.25) + q8(2.5)).to_f64(), 3.75);
        assert_eq!((q8(1.25) - q8(2.5)).to_f64(), -1.25);
        let mut x = q8(10.0);
        x += q8(0.5);
        x -= q8(3.0);
        assert_eq!(x.to_f64(), 7.5);
    }

    #[test]
    fn test_add_overflow_reports_operation() {
        let err = Q3::from_int(7).unwrap().try_add(Q3::from_int(1).unwrap());
        assert_eq!(
            err,
            Err(FixedPointError::Overflow {
                operation: Operation::Add,
                magnitude: 3,
                storage_bits: 16,
            })
        );
        let err = Q3::from_int(-8).unwrap().try_sub(Q3::smallest_positive());
        assert!(matches!(
            err,
            Err(FixedPointError::Overflow { operation: Operation::Sub, .. })
        ));
    }

    #[test]
    fn test_assign_leaves_value_on_error() {
        let mut x = Q3::max_value();
        assert!(x.try_add_assign(Q3::smallest_positive()).is_err());
        assert_eq!(x, Q3::max_value());
        assert!(x.try_sub_assign(Q3::from_int(1).unwrap()).is_ok());
        assert_eq!(x.to_f64(), 8.0 - 1.0 - 1.0 / 4096.0);
    }

    #[test]
    fn test_mul() {
        assert_eq!(q8(2.0) * q8(3.0), q8(6.0));
        assert_eq!((q8(-1.5) * q8(0.25)).to_f64(), -0.375);
        assert_eq!((q8(0.5) * 3).to_f64(), 1.5);
        let mut x = q8(1.5);
        x *= q8(2.0);
        x *= -2;
        assert_eq!(x.to_f64(), -6.0);
    }

    #[test]
    fn test_mul_overflow() {
        assert!(q8(16.0).try_mul(q8(16.0)).is_err());
        assert!(q8(15.9).try_mul(q8(16.0)).is_ok());
        assert!(q8(2.0).try_mul_int(128).is_err());
        assert!(q8(2.0).try_mul_int(127u8).is_ok());
        assert!(q8(0.5).try_mul_int(u64::MAX).is_err());
    }

    #[test]
    fn test_mul_truncates_toward_negative_infinity() {
        let lsb = Q8::smallest_positive();
        assert_eq!((lsb * q8(0.5)).raw(), 0);
        assert_eq!(((-lsb) * q8(0.5)).raw(), -1);
    }

    #[test]
    fn test_div() {
        assert_eq!((q8(7.0) / q8(2.0)).to_f64(), 3.5);
        assert_eq!((q8(-1.0) / q8(4.0)).to_f64(), -0.25);
        let third = q8(1.0) / q8(3.0);
        assert!((third.to_f64() - 1.0 / 3.0).abs() < 1e-6);
        let mut x = q8(9.0);
        x /= q8(-3.0);
        assert_eq!(x.to_f64(), -3.0);
    }

    #[test]
    fn test_div_errors() {
        assert_eq!(q8(1.0).try_div(Q8::zero()), Err(FixedPointError::DivideByZero));
        assert_eq!(
            WrapQ3::from_int(1).unwrap().try_div(WrapQ3::zero()),
            Err(FixedPointError::DivideByZero)
        );
        assert!(matches!(
            q8(200.0).try_div(q8(0.5)),
            Err(FixedPointError::Overflow { operation: Operation::Div, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_div_operator_panics_on_zero() {
        let _ = q8(1.0) / Q8::zero();
    }

    #[test]
    #[should_panic(expected = "multiplication overflowed")]
    fn test_mul_operator_panics_on_overflow() {
        let _ = q8(100.0) * q8(100.0);
    }

    #[test]
    fn test_wrapping_arithmetic() {
        let max = WrapQ3::max_value();
        assert_eq!(max + WrapQ3::smallest_positive(), WrapQ3::min_value());
        assert_eq!(WrapQ3::min_value() - WrapQ3::smallest_positive(), max);
        let four = WrapQ3::from_int(4).unwrap();
        // 16 wraps to 0 in a 3-bit magnitude.
        assert_eq!((four * four).raw(), 0);
        assert_eq!((four * 3).to_f64(), -4.0);
    }

    #[test]
    fn test_neg_and_abs() {
        assert_eq!((-q8(2.5)).to_f64(), -2.5);
        assert_eq!(q8(-2.5).abs().to_f64(), 2.5);
        assert_eq!(-Q3::min_value(), Q3::min_value());
        assert_eq!(Q3::min_value().abs(), Q3::min_value());
    }

    #[test]
    fn test_shifts() {
        assert_eq!((q8(1.5) << 2).to_f64(), 6.0);
        assert_eq!((q8(-6.0) >> 2).to_f64(), -1.5);
        let mut x = q8(3.0);
        x <<= 1;
        x >>= 3;
        assert_eq!(x.to_f64(), 0.75);
        // Shifting out the top bits loses them without an error.
        assert_eq!((Q3::from_int(4).unwrap() << 1).to_f64(), -8.0);
        assert_eq!((q8(1.0) << 40).raw(), 0);
    }
}
