//! # fixed_radix
//!
//! Binary fixed-point numbers parameterized entirely at compile time.
//!
//! ## Features
//!
//! - Magnitude (whole-number bits), storage integer, intermediate math
//!   integer and overflow mode are all type parameters
//! - Negative magnitudes trade whole numbers for extra fractional precision
//! - Checked formats return `Result` from every fallible operation, while
//!   wrapping formats compile down to plain two's-complement arithmetic
//! - Range checking of integer and float sources before conversion
//! - Exact rescaling between any two formats
//! - `bytemuck::Pod` values for zero-copy byte access
//! - A periodic lookup-table [`Interpolator`]
//!
//! ## Cargo features
//!
//! - `std` (default): `std::error::Error` via `thiserror`
//! - `half_support`: conversions to and from `half::f16`
//! - `tracing`: a debug event for every rejected operation
//!
//! ## Examples
//!
//! ```
//! use fixed_radix::{FixedPoint, FixedPointError, Wrapping};
//!
//! // 3 whole bits and 12 fractional bits in an i16, math in an i32
//! type Q3 = FixedPoint<3, i16, i32>;
//!
//! let a = Q3::from_f64(2.5)?;
//! let b = Q3::from_int(4)?;
//! assert_eq!(a.try_mul(b), Err(FixedPointError::Overflow {
//!     operation: fixed_radix::Operation::Mul,
//!     magnitude: 3,
//!     storage_bits: 16,
//! }));
//! assert_eq!((a - b).to_f64(), -1.5);
//!
//! // The same format without range checks wraps around instead.
//! type W3 = FixedPoint<3, i16, i32, Wrapping>;
//! let wrapped = W3::from_f64(2.5)? * W3::from_int(4)?;
//! assert_eq!(wrapped.to_f64(), -6.0);
//! # Ok::<(), FixedPointError>(())
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod convert;
pub mod error;
pub mod interpolator;
pub mod mode;
pub mod range;
pub mod scalar_formats;
pub mod storage;

mod fixed;

pub use error::{FixedPointError, Operation};
pub use fixed::{FixedFormat, FixedPoint};
pub use interpolator::Interpolator;
pub use mode::{Checked, Mode, Wrapping};
pub use range::RangeCheck;
pub use storage::{Int, MathFor};
