use core::fmt;

#[cfg(feature = "std")]
use thiserror::Error;

/// The operation that rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Construct,
    Convert,
    Add,
    Sub,
    Mul,
    Div,
    Round,
    Pow,
    Sqrt,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Construct => "construction",
            Operation::Convert => "conversion",
            Operation::Add => "addition",
            Operation::Sub => "subtraction",
            Operation::Mul => "multiplication",
            Operation::Div => "division",
            Operation::Round => "rounding",
            Operation::Pow => "exponentiation",
            Operation::Sqrt => "square root",
        };
        f.write_str(name)
    }
}

/// Errors for fixed-point operations
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedPointError {
    /// The whole-number part of the result does not fit the destination magnitude.
    #[cfg_attr(
        feature = "std",
        error("{operation} overflowed fixed-point format with magnitude {magnitude} in {storage_bits}-bit storage")
    )]
    Overflow {
        operation: Operation,
        magnitude: i32,
        storage_bits: u32,
    },

    #[cfg_attr(feature = "std", error("division by zero"))]
    DivideByZero,

    #[cfg_attr(feature = "std", error("square root of a negative value"))]
    NegativeSqrt,

    #[cfg_attr(feature = "std", error("Index {index} is out of bounds for length {len}"))]
    IndexOutOfBounds { index: usize, len: usize },
}

#[cfg(not(feature = "std"))]
impl fmt::Display for FixedPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixedPointError::Overflow {
                operation,
                magnitude,
                storage_bits,
            } => write!(
                f,
                "{} overflowed fixed-point format with magnitude {} in {}-bit storage",
                operation, magnitude, storage_bits
            ),
            FixedPointError::DivideByZero => write!(f, "division by zero"),
            FixedPointError::NegativeSqrt => write!(f, "square root of a negative value"),
            FixedPointError::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} is out of bounds for length {}", index, len)
            }
        }
    }
}

impl FixedPointError {
    pub(crate) fn overflow(operation: Operation, magnitude: i32, storage_bits: u32) -> Self {
        reject(FixedPointError::Overflow {
            operation,
            magnitude,
            storage_bits,
        })
    }
}

/// Passes a rejection through, reporting it when the `tracing` feature is on.
#[inline]
pub(crate) fn reject(err: FixedPointError) -> FixedPointError {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "fixed-point operation rejected");
    err
}
