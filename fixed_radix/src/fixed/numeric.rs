use super::FixedPoint;
use crate::error::{reject, FixedPointError, Operation};
use crate::mode::Mode;
use crate::storage::{Int, MathFor};

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> FixedPoint<M, S, W, C> {
    #[inline]
    fn frac_mask() -> S {
        S::low_mask(Self::RADIX)
    }

    /// The fractional remainder, so that `floor() + frac()` reproduces the
    /// value bit for bit. It is non-negative when `M >= 0`.
    ///
    /// With `M < 0` every bit is fractional and this is the value itself,
    /// negative values included.
    pub fn frac(self) -> Self {
        Self::from_raw(self.raw & Self::frac_mask())
    }

    /// Rounds toward negative infinity by clearing the fractional bits.
    ///
    /// With `M < 0` there are no whole-number bits to keep, so this is zero
    /// even for negative values, whose true floor of -1 is not
    /// representable. Comparisons against integers use the true floor.
    pub fn floor(self) -> Self {
        Self::from_raw(self.raw & !Self::frac_mask())
    }

    /// Rounds to the nearest whole number, ties toward positive infinity.
    ///
    /// Half an integer unit is added before flooring, so `-2.5` rounds to
    /// `-2` and `2.5` to `3`.
    ///
    /// # Errors
    ///
    /// `FixedPointError::Overflow` in checked formats when the rounded value
    /// exceeds [`max_value`](Self::max_value).
    pub fn round(self) -> Result<Self, FixedPointError> {
        // Every value of such a format lies in [-1/2, 1/2).
        if M < 0 {
            return Ok(Self::zero());
        }
        if Self::RADIX == 0 {
            return Ok(self);
        }
        let half = S::ONE.shift_left(Self::RADIX - 1);
        Ok(self.add_raw(half, Operation::Round)?.floor())
    }

    /// Raises the value to an integer power by repeated squaring.
    ///
    /// The base is not squared again once the remaining exponent reaches
    /// zero, so a checked format only fails when a product that contributes
    /// to the result overflows.
    ///
    /// # Errors
    ///
    /// `FixedPointError::Overflow` in checked formats, reported as
    /// `Operation::Pow` when an intermediate product overflows and as
    /// `Operation::Construct` for `exponent == 0` when one is not
    /// representable because `M < 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_radix::FixedPoint;
    ///
    /// let x = FixedPoint::<8>::from_f64(1.5)?;
    /// assert_eq!(x.pow(3)?.to_f64(), 3.375);
    /// assert_eq!(x.pow(0)?, FixedPoint::<8>::from_int(1)?);
    /// # Ok::<(), fixed_radix::FixedPointError>(())
    /// ```
    pub fn pow(self, exponent: u32) -> Result<Self, FixedPointError> {
        // `None` stands for one, which also lets formats without a
        // representable one raise fractions to positive powers.
        let mul = |a: Self, b: Self| {
            a.try_mul(b)
                .map_err(|_| Self::overflow(Operation::Pow))
        };
        let mut result: Option<Self> = None;
        let mut base = self;
        let mut remaining = exponent;
        loop {
            if remaining & 1 == 1 {
                result = Some(match result {
                    Some(value) => mul(value, base)?,
                    None => base,
                });
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            base = mul(base, base)?;
        }
        match result {
            Some(value) => Ok(value),
            None => Self::one(),
        }
    }

    /// Square root by the binary digit-by-digit method on raw integers.
    ///
    /// The raw value is widened and shifted left by the radix, so the
    /// integer root of the widened value carries exactly `RADIX` fractional
    /// bits. The result is truncated.
    ///
    /// The math type must hold `raw << RADIX`; for `M >= 0` twice the
    /// storage width is enough. Wrapping formats do not check this.
    ///
    /// # Errors
    ///
    /// `FixedPointError::NegativeSqrt` for negative values. Checked formats
    /// return `FixedPointError::Overflow` when the shifted value does not
    /// fit the math type, or when `M < 0` and the root exceeds the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_radix::FixedPoint;
    ///
    /// let four = FixedPoint::<8>::from_int(4)?;
    /// assert_eq!(four.sqrt()?, FixedPoint::<8>::from_int(2)?);
    /// # Ok::<(), fixed_radix::FixedPointError>(())
    /// ```
    pub fn sqrt(self) -> Result<Self, FixedPointError> {
        if self.raw < S::ZERO {
            return Err(reject(FixedPointError::NegativeSqrt));
        }

        let widened = self.widen();
        let mut remainder = widened.shift_left(Self::RADIX);
        if C::CHECKED && remainder.shift_right(Self::RADIX) != widened {
            return Err(Self::overflow(Operation::Sqrt));
        }
        let mut root = W::ZERO;
        let mut bit = W::ONE.shift_left(W::BITS - 2);
        while bit > remainder {
            bit = bit.shift_right(2);
        }

        while bit != W::ZERO {
            let trial = root.wrapping_add(bit);
            if remainder >= trial {
                remainder = remainder.wrapping_sub(trial);
                root = root.shift_right(1).wrapping_add(bit);
            } else {
                root = root.shift_right(1);
            }
            bit = bit.shift_right(2);
        }

        if C::CHECKED {
            Self::narrow(root, Operation::Sqrt)
        } else {
            Ok(Self::from_raw(root.cast()))
        }
    }
}
