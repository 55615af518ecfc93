use core::marker::PhantomData;

use crate::convert::{self, exp2};
use crate::error::{FixedPointError, Operation};
use crate::mode::{Checked, Mode};
use crate::range::{self, RangeCheck};
use crate::storage::{Int, MathFor};

mod arith;
mod compare;
mod interop;
mod numeric;

/// A binary fixed-point number.
///
/// The raw value `raw` of storage type `S` represents `raw / 2^RADIX`, where
/// `RADIX = bits(S) - M - 1`. `M` is the number of whole-number bits besides
/// the sign. A negative `M` pushes the radix past the storage width, trading
/// every whole number for extra fractional precision.
///
/// # Type Parameters
///
/// - `M`: magnitude, `-bits(S) <= M < bits(S)`
/// - `S`: storage integer (`i8` through `i128`)
/// - `W`: intermediate math integer, at least as wide as `S`
/// - `C`: [`Checked`] or [`Wrapping`](crate::Wrapping) overflow handling
///
/// # Examples
///
/// ```
/// use fixed_radix::FixedPoint;
///
/// // 8 whole bits and 23 fractional bits in an i32
/// let x = FixedPoint::<8>::from_f64(3.25)?;
/// let y = FixedPoint::<8>::from_int(2)?;
///
/// assert_eq!((x * y).to_f64(), 6.5);
/// assert_eq!((x - y).to_int(), 1);
/// assert!(FixedPoint::<8>::from_int(256).is_err());
/// # Ok::<(), fixed_radix::FixedPointError>(())
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedPoint<const M: i32, S: Int = i32, W: MathFor<S> = i64, C: Mode = Checked> {
    raw: S,
    _format: PhantomData<(W, C)>,
}

/// Fractional bit count of a format, rejected at compile time when the
/// magnitude does not suit the storage width.
const fn format_radix(storage_bits: u32, magnitude: i32) -> u32 {
    let bits = storage_bits as i32;
    assert!(magnitude < bits, "magnitude leaves no room for the sign bit");
    assert!(magnitude >= -bits, "magnitude is below minus the storage width");
    convert::radix(storage_bits, magnitude) as u32
}

/// A fixed-point format, independent of its concrete parameters.
///
/// This is the seam for moving values between differently parameterized
/// [`FixedPoint`] types and for code that works on raw scaled integers.
pub trait FixedFormat: Copy {
    type Storage: Int;
    type Math: MathFor<Self::Storage>;

    const MAGNITUDE: i32;
    const RADIX: u32;
    const CHECKED: bool;

    /// Wraps a pre-scaled storage value without any checks.
    fn from_raw(raw: Self::Storage) -> Self;

    fn raw(self) -> Self::Storage;

    /// Converts from any other format, rescaling the raw bits.
    ///
    /// In checked formats a value whose whole-number part does not fit
    /// returns `FixedPointError::Overflow`. Fractional bits beyond this
    /// format's precision are truncated toward negative infinity.
    fn from_fixed<F: FixedFormat>(value: F) -> Result<Self, FixedPointError> {
        let raw = value.raw();
        if Self::CHECKED && !raw.fits(F::MAGNITUDE, Self::MAGNITUDE) {
            return Err(FixedPointError::overflow(
                Operation::Convert,
                Self::MAGNITUDE,
                <Self::Storage as Int>::BITS,
            ));
        }
        Ok(Self::from_raw(convert::rescale(
            raw,
            F::MAGNITUDE,
            Self::MAGNITUDE,
        )))
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> FixedFormat for FixedPoint<M, S, W, C> {
    type Storage = S;
    type Math = W;

    const MAGNITUDE: i32 = M;
    const RADIX: u32 = format_radix(S::BITS, M);
    const CHECKED: bool = C::CHECKED;

    #[inline]
    fn from_raw(raw: S) -> Self {
        Self {
            raw,
            _format: PhantomData,
        }
    }

    #[inline]
    fn raw(self) -> S {
        self.raw
    }
}

impl<const M: i32, S: Int, W: MathFor<S>, C: Mode> FixedPoint<M, S, W, C> {
    pub const MAGNITUDE: i32 = M;
    pub const RADIX: u32 = format_radix(S::BITS, M);
    pub const STORAGE_BITS: u32 = S::BITS;
    pub const MATH_BITS: u32 = W::BITS;

    /// Number of bits representing the whole-number part.
    #[inline]
    pub const fn magnitude() -> i32 {
        M
    }

    /// Number of bits representing the fractional part.
    #[inline]
    pub const fn radix() -> u32 {
        Self::RADIX
    }

    #[inline]
    pub const fn storage_bits() -> u32 {
        S::BITS
    }

    #[inline]
    pub const fn math_bits() -> u32 {
        W::BITS
    }

    /// Factor taking a real number to its raw value, `2^RADIX`.
    #[inline]
    pub fn conversion_factor() -> f64 {
        exp2(Self::RADIX as i32)
    }

    /// Factor taking a raw value to the real number, `2^-RADIX`.
    #[inline]
    pub fn inv_conversion_factor() -> f64 {
        exp2(-(Self::RADIX as i32))
    }

    /// The raw pattern with only the sign bit set.
    #[inline]
    pub const fn sign_mask() -> S {
        S::MIN
    }

    /// Wraps a pre-scaled storage value.
    ///
    /// This bypasses every range check; the caller is responsible for the
    /// value meaning what it should at this radix.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_radix::FixedPoint;
    ///
    /// // With 23 fractional bits, raw 1 << 23 is 1.0
    /// let one = FixedPoint::<8>::from_raw(1 << 23);
    /// assert_eq!(one.to_f64(), 1.0);
    /// ```
    #[inline]
    pub const fn from_raw(raw: S) -> Self {
        Self {
            raw,
            _format: PhantomData,
        }
    }

    /// Returns the raw integer representation.
    #[inline]
    pub fn raw(self) -> S {
        self.raw
    }

    /// Overwrites the raw integer representation, bypassing every check.
    #[inline]
    pub fn set_raw(&mut self, raw: S) {
        self.raw = raw;
    }

    pub const fn zero() -> Self {
        Self::from_raw(S::ZERO)
    }

    /// The value one, which only exists for `M >= 1`.
    ///
    /// # Errors
    ///
    /// Returns `FixedPointError::Overflow` in checked formats with `M < 1`.
    pub fn one() -> Result<Self, FixedPointError> {
        Self::from_int(1i32)
    }

    /// Returns the maximum representable value.
    pub const fn max_value() -> Self {
        Self::from_raw(S::MAX)
    }

    /// Returns the minimum representable value.
    pub const fn min_value() -> Self {
        Self::from_raw(S::MIN)
    }

    /// One unit in the last place.
    pub const fn smallest_positive() -> Self {
        Self::from_raw(S::ONE)
    }

    pub const fn smallest_negative() -> Self {
        Self::from_raw(S::NEG_ONE)
    }

    /// Creates a fixed-point number from a whole number of any primitive
    /// integer type.
    ///
    /// # Errors
    ///
    /// In checked formats, returns `FixedPointError::Overflow` unless
    /// `-2^M <= value < 2^M`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_radix::FixedPoint;
    ///
    /// assert!(FixedPoint::<4, i16, i32>::from_int(15u8).is_ok());
    /// assert!(FixedPoint::<4, i16, i32>::from_int(-16i64).is_ok());
    /// assert!(FixedPoint::<4, i16, i32>::from_int(16u32).is_err());
    /// ```
    pub fn from_int<I: RangeCheck>(value: I) -> Result<Self, FixedPointError> {
        if C::CHECKED && !value.fits(I::WHOLE_MAGNITUDE, M) {
            return Err(Self::overflow(Operation::Construct));
        }
        Ok(Self::from_raw(
            S::from_i128(value.as_i128()).shift_left(Self::RADIX),
        ))
    }

    /// Creates a fixed-point number from an f64, truncating toward zero.
    ///
    /// # Errors
    ///
    /// In checked formats, returns `FixedPointError::Overflow` unless
    /// `-2^M <= value < 2^M`. NaN is always rejected there; in wrapping
    /// formats it becomes zero and out-of-range values saturate.
    pub fn from_f64(value: f64) -> Result<Self, FixedPointError> {
        if C::CHECKED && !range::float_fits(value, M) {
            return Err(Self::overflow(Operation::Construct));
        }
        Ok(Self::from_raw(S::from_f64(value * Self::conversion_factor())))
    }

    /// Creates a fixed-point number from an f32, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Same as [`from_f64`](Self::from_f64).
    pub fn from_f32(value: f32) -> Result<Self, FixedPointError> {
        Self::from_f64(f64::from(value))
    }

    /// Converts from another fixed-point format.
    ///
    /// The range check follows this format's mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_radix::FixedPoint;
    ///
    /// let wide = FixedPoint::<20, i64, i128>::from_f64(-7.5)?;
    /// let narrow = FixedPoint::<3, i16, i32>::from_fixed(wide)?;
    /// assert_eq!(narrow.to_f64(), -7.5);
    ///
    /// let big = FixedPoint::<20, i64, i128>::from_int(9)?;
    /// assert!(FixedPoint::<3, i16, i32>::from_fixed(big).is_err());
    /// # Ok::<(), fixed_radix::FixedPointError>(())
    /// ```
    pub fn from_fixed<F: FixedFormat>(value: F) -> Result<Self, FixedPointError> {
        <Self as FixedFormat>::from_fixed(value)
    }

    /// Converts into another fixed-point format.
    ///
    /// The range check follows the target format's mode.
    pub fn to_fixed<F: FixedFormat>(self) -> Result<F, FixedPointError> {
        F::from_fixed(self)
    }

    pub fn to_f64(self) -> f64 {
        self.raw.to_f64() * Self::inv_conversion_factor()
    }

    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// The whole-number part, rounded toward negative infinity.
    ///
    /// Formats with `M < 0` hold no whole numbers and always return zero.
    pub fn to_int(self) -> S {
        if M < 0 {
            S::ZERO
        } else {
            self.raw.shift_right(Self::RADIX)
        }
    }

    #[inline]
    pub(crate) fn overflow(operation: Operation) -> FixedPointError {
        FixedPointError::overflow(operation, M, S::BITS)
    }

    #[inline]
    pub(crate) fn widen(self) -> W {
        self.raw.cast()
    }

    /// Narrows a math-width value holding this format's radix back to
    /// storage, failing when its whole-number part does not fit.
    #[inline]
    pub(crate) fn narrow(value: W, operation: Operation) -> Result<Self, FixedPointError> {
        let math_magnitude = W::BITS as i32 - 1 - Self::RADIX as i32;
        if value.fits(math_magnitude, M) {
            Ok(Self::from_raw(value.cast()))
        } else {
            Err(Self::overflow(operation))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Wrapping;

    type Q8 = FixedPoint<8>;
    type Q3 = FixedPoint<3, i16, i32>;
    type Tiny = FixedPoint<-4, i16, i32>;

    #[test]
    fn test_introspection() {
        assert_eq!(Q8::magnitude(), 8);
        assert_eq!(Q8::radix(), 23);
        assert_eq!(Q8::storage_bits(), 32);
        assert_eq!(Q8::math_bits(), 64);
        assert_eq!(Q8::conversion_factor(), 8_388_608.0);
        assert_eq!(Tiny::radix(), 19);
        assert_eq!(Q3::sign_mask(), i16::MIN);
    }

    #[test]
    fn test_from_int_places_radix() {
        let x = Q8::from_int(3).unwrap();
        assert_eq!(x.raw(), 3 << 23);
        assert_eq!(x.to_int(), 3);
        assert_eq!(Q8::from_int(-256).unwrap().to_int(), -256);
    }

    #[test]
    fn test_from_int_range() {
        assert!(Q8::from_int(255u8).is_ok());
        assert!(Q8::from_int(256u16).is_err());
        assert!(Q8::from_int(-257i64).is_err());
        assert!(Tiny::from_int(0).is_ok());
        assert!(Tiny::from_int(1).is_err());
        assert!(Tiny::from_int(-1).is_err());
    }

    #[test]
    fn test_from_float_truncates() {
        let x = Q3::from_f64(1.0 + 1.5 / 4096.0).unwrap();
        assert_eq!(x.raw(), 4097);
        let y = Q3::from_f64(-(1.0 + 1.5 / 4096.0)).unwrap();
        assert_eq!(y.raw(), -4097);
    }

    #[test]
    fn test_from_float_range() {
        assert!(Q3::from_f32(7.999).is_ok());
        assert!(Q3::from_f32(8.0).is_err());
        assert!(Q3::from_f32(-8.0).is_ok());
        assert!(Q3::from_f64(f64::NAN).is_err());
        assert!(Tiny::from_f64(0.06).is_ok());
        assert!(Tiny::from_f64(-0.0625).is_ok());
        assert!(Tiny::from_f64(0.0625).is_err());
    }

    #[test]
    fn test_wrapping_construction_skips_checks() {
        type W3 = FixedPoint<3, i16, i32, Wrapping>;
        // 9 << 12 wraps past the sign bit of an i16.
        assert_eq!(W3::from_int(9).unwrap().raw(), 9i16.wrapping_shl(12));
        assert_eq!(W3::from_f64(1000.0).unwrap(), W3::max_value());
    }

    #[test]
    fn test_negative_magnitude_round_trip() {
        let x = Tiny::from_f64(0.03125).unwrap();
        assert_eq!(x.raw(), 1 << 14);
        assert_eq!(x.to_f64(), 0.03125);
        assert_eq!(x.to_int(), 0);
    }

    #[test]
    fn test_to_int_floors() {
        assert_eq!(Q8::from_f64(-2.5).unwrap().to_int(), -3);
        assert_eq!(Q8::from_f64(2.5).unwrap().to_int(), 2);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Q3::max_value().raw(), i16::MAX);
        assert_eq!(Q3::min_value().to_f64(), -8.0);
        assert_eq!(Q3::smallest_positive().to_f64(), 1.0 / 4096.0);
        assert_eq!(Q3::smallest_negative().to_f64(), -1.0 / 4096.0);
        assert_eq!(Q3::zero().raw(), 0);
        assert_eq!(Q3::one().unwrap().raw(), 1 << 12);
        assert!(FixedPoint::<0, i16, i32>::one().is_err());
    }

    #[test]
    fn test_set_raw() {
        let mut x = Q8::zero();
        x.set_raw(5 << 22);
        assert_eq!(x.to_f64(), 2.5);
    }

    #[test]
    fn test_cross_format_conversion() {
        let x = Q8::from_f64(-3.375).unwrap();
        let y: Q3 = x.to_fixed().unwrap();
        assert_eq!(y.to_f64(), -3.375);
        let back = Q8::from_fixed(y).unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn test_cross_format_overflow() {
        let x = Q8::from_int(8).unwrap();
        let err = Q3::from_fixed(x).unwrap_err();
        assert_eq!(
            err,
            FixedPointError::Overflow {
                operation: Operation::Convert,
                magnitude: 3,
                storage_bits: 16,
            }
        );
        type W3 = FixedPoint<3, i16, i32, Wrapping>;
        assert!(W3::from_fixed(x).is_ok());
    }
}
