//! Overflow handling selected at the type level.
//!
//! The mode is a type parameter rather than a field, so `Wrapping`
//! arithmetic compiles to plain integer instructions with no range checks.

use core::fmt::Debug;
use core::hash::Hash;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Checked {}
    impl Sealed for super::Wrapping {}
}

pub trait Mode:
    sealed::Sealed + Copy + Default + Debug + Eq + Ord + Hash + Send + Sync + 'static
{
    /// Whether operations validate their result before committing it.
    const CHECKED: bool;
}

/// Every operation is range-checked and reports `FixedPointError::Overflow`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checked;

/// Operations wrap around silently in two's complement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wrapping;

impl Mode for Checked {
    const CHECKED: bool = true;
}

impl Mode for Wrapping {
    const CHECKED: bool = false;
}
