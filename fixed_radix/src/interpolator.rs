//! Linear interpolation over one unit interval.
//!
//! A table of `N = 2^k + 1` samples covers `[0, 1]` in `2^k` equal steps.
//! Only the fractional part of the input is used, so the table describes
//! one period of a periodic curve. Lookup works on raw scaled integers and
//! does no range checking.

use crate::error::{reject, FixedPointError};
use crate::fixed::FixedFormat;
use crate::storage::Int;

/// A periodic lookup table with linear interpolation between samples.
///
/// # Examples
///
/// ```
/// use fixed_radix::{FixedPoint, Interpolator};
///
/// type Q8 = FixedPoint<8>;
///
/// // x^2 sampled at 0, 1/4, 1/2, 3/4 and 1.
/// let table = Interpolator::<Q8, 5>::from_fn(|i| {
///     let x = i as f64 / 4.0;
///     Q8::from_f64(x * x).unwrap_or(Q8::zero())
/// });
///
/// let y = table.interpolate(Q8::from_f64(2.375)?);
/// assert_eq!(y.to_f64(), 0.15625);
/// # Ok::<(), fixed_radix::FixedPointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolator<F: FixedFormat, const N: usize> {
    table: [F::Storage; N],
}

impl<F: FixedFormat, const N: usize> Interpolator<F, N> {
    /// Fraction bits that select the table interval.
    const STEP_BITS: u32 = {
        assert!(N >= 2 && (N - 1).is_power_of_two(), "table length must be 2^k + 1");
        assert!(F::MAGNITUDE >= 0, "input format needs a non-negative magnitude");
        let bits = (N - 1).trailing_zeros();
        assert!(bits <= F::RADIX, "more table intervals than fractional bits");
        // Sample difference times proportion must fit the i128 blend.
        assert!(
            <F::Storage as Int>::BITS + 1 + F::RADIX - bits <= 128,
            "interpolation product does not fit in 128 bits"
        );
        bits
    };

    /// Creates a table with every sample at zero.
    pub fn new() -> Self {
        let _ = Self::STEP_BITS;
        Self {
            table: [<F::Storage as Int>::ZERO; N],
        }
    }

    /// Creates a table from a function of the sample index.
    pub fn from_fn(mut sample: impl FnMut(usize) -> F) -> Self {
        let _ = Self::STEP_BITS;
        Self {
            table: core::array::from_fn(|i| sample(i).raw()),
        }
    }

    /// Number of samples, one more than the number of intervals.
    pub const fn size() -> usize {
        N
    }

    /// Stores a sample.
    ///
    /// # Errors
    ///
    /// Returns `FixedPointError::IndexOutOfBounds` if `index >= N`.
    pub fn set(&mut self, index: usize, value: F) -> Result<(), FixedPointError> {
        match self.table.get_mut(index) {
            Some(slot) => {
                *slot = value.raw();
                Ok(())
            }
            None => Err(reject(FixedPointError::IndexOutOfBounds { index, len: N })),
        }
    }

    /// Returns the sample at the given index, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<F> {
        self.table.get(index).map(|&raw| F::from_raw(raw))
    }

    /// Samples the table at the fractional part of `input`.
    ///
    /// The top `k` fraction bits pick the interval and the rest weight the
    /// two neighbouring samples. The blend runs in `i128` whatever the
    /// format's math width, so it is exact for every storage up to `i64`.
    pub fn interpolate(&self, input: F) -> F {
        let proportion_bits = F::RADIX - Self::STEP_BITS;
        let position = input.raw() & <F::Storage as Int>::low_mask(F::RADIX);
        let index = position.shift_right(proportion_bits).to_i128() as usize;
        let proportion = (position & <F::Storage as Int>::low_mask(proportion_bits)).to_i128();

        let low = self.table[index].to_i128();
        let high = self.table[index + 1].to_i128();
        let offset = ((high - low) * proportion) >> proportion_bits;
        F::from_raw(<F::Storage as Int>::from_i128(low + offset))
    }

    /// The raw sample table.
    pub fn raw_table(&self) -> &[F::Storage; N] {
        &self.table
    }

    /// Returns the raw bytes of the table for serialization.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.table)
    }
}

impl<F: FixedFormat, const N: usize> Default for Interpolator<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedPoint;

    type Q8 = FixedPoint<8>;
    type Q1 = FixedPoint<1, i16, i32>;

    fn ramp() -> Interpolator<Q8, 5> {
        // 0, 1, 2, 3, 4 at t = 0, 1/4, 1/2, 3/4, 1.
        Interpolator::from_fn(|i| Q8::from_int(i as i32).unwrap())
    }

    #[test]
    fn test_samples_land_on_table_entries() {
        let table = ramp();
        for i in 0..4 {
            let t = Q8::from_f64(i as f64 / 4.0).unwrap();
            assert_eq!(table.interpolate(t), Q8::from_int(i as i32).unwrap());
        }
    }

    #[test]
    fn test_interpolates_between_samples() {
        let table = ramp();
        let t = Q8::from_f64(0.625).unwrap();
        assert_eq!(table.interpolate(t).to_f64(), 2.5);
    }

    #[test]
    fn test_only_fraction_is_used() {
        let table = ramp();
        let a = table.interpolate(Q8::from_f64(0.375).unwrap());
        let b = table.interpolate(Q8::from_f64(17.375).unwrap());
        let c = table.interpolate(Q8::from_f64(-0.625).unwrap());
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_descending_samples() {
        let table = Interpolator::<Q1, 3>::from_fn(|i| Q1::from_f64(1.0 - i as f64 * 0.75).unwrap());
        let y = table.interpolate(Q1::from_f64(0.25).unwrap());
        assert_eq!(y.to_f64(), 0.625);
    }

    #[test]
    fn test_math_as_narrow_as_storage() {
        type Narrow = FixedPoint<8, i32, i32>;
        let table = Interpolator::<Narrow, 3>::from_fn(|i| Narrow::from_int(i as i32 * 100).unwrap());
        let y = table.interpolate(Narrow::from_f64(0.25).unwrap());
        assert_eq!(y.to_f64(), 50.0);
        let y = table.interpolate(Narrow::from_f64(0.875).unwrap());
        assert_eq!(y.to_f64(), 175.0);
    }

    #[test]
    fn test_wide_storage() {
        type Wide = FixedPoint<20, i64, i64>;
        let table = Interpolator::<Wide, 5>::from_fn(|i| Wide::from_int(-(i as i64) * 1000).unwrap());
        let y = table.interpolate(Wide::from_f64(0.375).unwrap());
        assert_eq!(y.to_f64(), -1500.0);
    }

    #[test]
    fn test_set_and_get() {
        let mut table = Interpolator::<Q8, 3>::new();
        assert_eq!(Interpolator::<Q8, 3>::size(), 3);
        table.set(2, Q8::from_int(5).unwrap()).unwrap();
        assert_eq!(table.get(2), Some(Q8::from_int(5).unwrap()));
        assert_eq!(table.get(3), None);
        assert_eq!(
            table.set(3, Q8::zero()),
            Err(FixedPointError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(table.raw_table()[2], 5 << 23);
    }

    #[test]
    fn test_as_bytes() {
        let table = ramp();
        let bytes = table.as_bytes();
        assert_eq!(bytes.len(), 5 * 4);
        assert_eq!(&bytes[4..8], &(1i32 << 23).to_ne_bytes());
    }
}
