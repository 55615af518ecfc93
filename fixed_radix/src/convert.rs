//! Rescaling raw values between fixed-point formats.

use crate::storage::Int;

/// Fractional bit count of a signed format: one bit is reserved for the sign.
#[inline]
pub const fn radix(storage_bits: u32, magnitude: i32) -> i32 {
    storage_bits as i32 - magnitude - 1
}

/// Converts a raw value at `(Src, source_magnitude)` to the raw value at
/// `(Dst, dest_magnitude)` representing the same number.
///
/// No range check happens here. Integer bits that do not fit the
/// destination are silently lost, so callers that care run
/// [`RangeCheck::fits`](crate::range::RangeCheck::fits) first. Fractional
/// bits below the destination's radix are truncated toward negative infinity.
///
/// When `Src` is the wider type the radix points are aligned before
/// narrowing, otherwise after widening, so the shift always happens in the
/// wider of the two types.
///
/// # Examples
///
/// ```
/// use fixed_radix::convert::rescale;
///
/// // 1.5 as Q8.23 in an i32, moved to Q3.12 in an i16.
/// let raw: i16 = rescale(3i32 << 22, 8, 3);
/// assert_eq!(raw, 3 << 11);
/// ```
pub fn rescale<Src: Int, Dst: Int>(value: Src, source_magnitude: i32, dest_magnitude: i32) -> Dst {
    let source_radix = radix(Src::BITS, source_magnitude);
    let dest_radix = radix(Dst::BITS, dest_magnitude);

    if Src::BITS > Dst::BITS {
        align(value, source_radix, dest_radix).cast()
    } else {
        align(value.cast::<Dst>(), source_radix, dest_radix)
    }
}

#[inline]
fn align<T: Int>(value: T, source_radix: i32, dest_radix: i32) -> T {
    if source_radix > dest_radix {
        value.shift_right((source_radix - dest_radix) as u32)
    } else {
        value.shift_left((dest_radix - source_radix) as u32)
    }
}

/// `2^exponent` as an `f64`, built directly from its bit pattern.
///
/// Exact for exponents in `-1022..=1023`, which covers every radix and
/// magnitude a supported format can have.
#[inline]
pub(crate) fn exp2(exponent: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exponent));
    f64::from_bits(((exponent + 1023) as u64) << 52)
}
