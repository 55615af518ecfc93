//! Lossless range checks between (type, magnitude) pairs.
//!
//! An integer of `B` bits read at magnitude `m` has `B - m - 1` fractional
//! bits when signed and `B - m` when unsigned. A plain integer is read at
//! [`RangeCheck::WHOLE_MAGNITUDE`], which leaves no fractional bits.

use crate::convert::exp2;

mod sealed {
    pub trait Sealed {}
    macro_rules! seal {
        ($($t:ty),*) => { $(impl Sealed for $t {})* };
    }
    seal!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
}

/// Decides whether an integer value fits a destination magnitude.
pub trait RangeCheck: sealed::Sealed + Copy {
    /// Magnitude at which the type's bits are all whole-number bits.
    const WHOLE_MAGNITUDE: i32;

    /// Returns `true` if `self`, read at `source_magnitude`, has a
    /// whole-number part that fits in `dest_magnitude` bits.
    ///
    /// Fractional precision is not considered; only the integer bits are.
    fn fits(self, source_magnitude: i32, dest_magnitude: i32) -> bool;

    /// The value as an `i128`, wrapping for `u128` values above `i128::MAX`.
    fn as_i128(self) -> i128;
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl RangeCheck for $t {
            const WHOLE_MAGNITUDE: i32 = <$t>::BITS as i32;

            #[inline]
            fn fits(self, source_magnitude: i32, dest_magnitude: i32) -> bool {
                if source_magnitude <= dest_magnitude {
                    return true;
                }
                // Bits at `keep` and above lie past the destination magnitude.
                let keep = <$t>::BITS as i64 - source_magnitude as i64 + dest_magnitude as i64;
                if keep < 0 {
                    return self == 0;
                }
                let mask: $t = !0 << keep as u32;
                self & mask == 0
            }

            #[inline]
            fn as_i128(self) -> i128 {
                self as i128
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl RangeCheck for $t {
            const WHOLE_MAGNITUDE: i32 = <$t>::BITS as i32 - 1;

            #[inline]
            fn fits(self, source_magnitude: i32, dest_magnitude: i32) -> bool {
                if source_magnitude <= dest_magnitude {
                    return true;
                }
                // Bits at `keep` and above must all repeat the sign.
                let keep = <$t>::BITS as i64 - 1 - source_magnitude as i64 + dest_magnitude as i64;
                if keep < 0 {
                    return self == 0;
                }
                let mask: $t = !0 << keep as u32;
                (self & mask) == 0 || (!self & mask) == 0
            }

            #[inline]
            fn as_i128(self) -> i128 {
                self as i128
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_signed!(i8, i16, i32, i64, i128, isize);

/// Returns `true` if `value` lies in `[-2^m, 2^m)` for `m = dest_magnitude`.
///
/// NaN and infinities never fit.
pub fn float_fits(value: f64, dest_magnitude: i32) -> bool {
    let limit = match dest_magnitude {
        // Past f64::MAX every finite value fits.
        1024.. => return value.is_finite(),
        // Below the smallest subnormal only zero fits.
        ..=-1075 => return value == 0.0,
        -1022.. => exp2(dest_magnitude),
        _ => exp2(dest_magnitude + 52) * exp2(-52),
    };
    value >= -limit && value < limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smaller_source_magnitude_always_fits() {
        assert!(u32::MAX.fits(32, 32));
        assert!(i64::MIN.fits(10, 10));
        assert!((-1i8).fits(3, 40));
    }

    #[test]
    fn test_unsigned_whole_numbers() {
        let m = u8::WHOLE_MAGNITUDE;
        assert!(7u8.fits(m, 3));
        assert!(!8u8.fits(m, 3));
        assert!(!255u8.fits(m, 7));
        assert!(127u8.fits(m, 7));
        assert!(0u32.fits(u32::WHOLE_MAGNITUDE, -2));
        assert!(!1u32.fits(u32::WHOLE_MAGNITUDE, -2));
    }

    #[test]
    fn test_signed_whole_numbers() {
        let m = i32::WHOLE_MAGNITUDE;
        assert!(7i32.fits(m, 3));
        assert!((-8i32).fits(m, 3));
        assert!(!8i32.fits(m, 3));
        assert!(!(-9i32).fits(m, 3));
        assert!(!1i32.fits(m, 0));
        assert!((-1i32).fits(m, 0));
        assert!(!(-1i32).fits(m, -1));
    }

    #[test]
    fn test_signed_fractional_source() {
        // Read at magnitude 8 an i32 has 23 fractional bits.
        let two_and_a_half = 5i32 << 22;
        assert!(two_and_a_half.fits(8, 2));
        assert!(!two_and_a_half.fits(8, 1));
        let minus_half = -(1i32 << 22);
        assert!(minus_half.fits(8, -1));
        let minus_three_quarters = -(3i32 << 21);
        assert!(!minus_three_quarters.fits(8, -1));
    }

    #[test]
    fn test_float_bounds() {
        assert!(float_fits(255.999, 8));
        assert!(!float_fits(256.0, 8));
        assert!(float_fits(-256.0, 8));
        assert!(!float_fits(-256.001, 8));
        assert!(float_fits(0.0624, -4));
        assert!(!float_fits(0.0625, -4));
        assert!(!float_fits(f64::NAN, 8));
        assert!(!float_fits(f64::INFINITY, 100));
    }

    #[test]
    fn test_float_bounds_at_exponent_extremes() {
        assert!(float_fits(1.0, 2000));
        assert!(float_fits(f64::MAX, 1024));
        assert!(float_fits(-f64::MAX, i32::MAX));
        assert!(!float_fits(f64::NEG_INFINITY, 2000));
        assert!(!float_fits(f64::NAN, 2000));
        assert!(float_fits(0.0, -2000));
        assert!(!float_fits(1e-300, i32::MIN));
        // 2^-1074 is the smallest subnormal.
        let tiniest = f64::from_bits(1);
        assert!(!float_fits(tiniest, -1074));
        assert!(float_fits(tiniest, -1073));
        assert!(float_fits(-tiniest, -1074));
        assert!(float_fits(1.0e-308, -1023));
        assert!(!float_fits(2.0e-308, -1023));
    }

    #[test]
    fn test_extreme_magnitudes() {
        assert!(0i32.fits(i32::MAX, i32::MIN));
        assert!(!5i32.fits(i32::MAX, i32::MIN));
        assert!(!(-1i64).fits(i32::MAX, -1));
        assert!(!1u8.fits(i32::MAX, i32::MIN));
        assert!(u128::MAX.fits(i32::MIN, i32::MAX));
        assert!(!i8::MIN.fits(8, i32::MIN + 1));
    }

    mod prop {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn signed_whole_number_matches_interval(v in any::<i32>(), m in -4i32..31) {
                let limit = 2f64.powi(m);
                let expected = (v as f64) >= -limit && (v as f64) < limit;
                prop_assert_eq!(v.fits(i32::WHOLE_MAGNITUDE, m), expected);
            }

            #[test]
            fn unsigned_whole_number_matches_interval(v in any::<u16>(), m in -4i32..16) {
                let expected = (v as f64) < 2f64.powi(m);
                prop_assert_eq!(v.fits(u16::WHOLE_MAGNITUDE, m), expected);
            }

            #[test]
            fn float_check_agrees_with_integer_check(v in any::<i16>(), m in 0i32..15) {
                prop_assert_eq!(float_fits(v as f64, m), v.fits(i16::WHOLE_MAGNITUDE, m));
            }
        }
    }
}
