//! Common fixed-point format type aliases.
//!
//! The naming convention is `FixedM_R` where M is the magnitude (whole-number
//! bits besides the sign) and R is the radix (fractional bits). All aliases
//! are checked unless prefixed with `Wrapping`.

use crate::mode::Wrapping;
use crate::FixedPoint;

/// 0.15 format in an i16, the usual Q15 audio sample.
///
/// Range: [-1.0, 0.999969482]
/// Precision: ~0.000030518
pub type Fixed0_15 = FixedPoint<0, i16, i32>;

/// 3.12 format in an i16.
///
/// Range: [-8.0, 7.999755859]
/// Precision: ~0.000244141
pub type Fixed3_12 = FixedPoint<3, i16, i32>;

/// 7.8 format in an i16.
///
/// Range: [-128.0, 127.99609375]
/// Precision: ~0.00390625
pub type Fixed7_8 = FixedPoint<7, i16, i32>;

/// 0.31 format in an i32.
///
/// Range: [-1.0, 0.9999999995]
/// Precision: ~0.000000000466
pub type Fixed0_31 = FixedPoint<0, i32, i64>;

/// 8.23 format in an i32, the default parameters.
///
/// Range: [-256.0, 255.999999881]
/// Precision: ~0.000000119
pub type Fixed8_23 = FixedPoint<8>;

/// 15.16 format in an i32.
///
/// Range: [-32768.0, 32767.999984741]
/// Precision: ~0.000015259
pub type Fixed15_16 = FixedPoint<15>;

/// 31.32 format in an i64 with i128 intermediates.
///
/// Range: [-2147483648.0, 2147483647.999999999767]
/// Precision: ~0.000000000233
pub type Fixed31_32 = FixedPoint<31, i64, i128>;

/// 7.8 format without range checks.
pub type WrappingFixed7_8 = FixedPoint<7, i16, i32, Wrapping>;

/// 15.16 format without range checks.
pub type WrappingFixed15_16 = FixedPoint<15, i32, i64, Wrapping>;
