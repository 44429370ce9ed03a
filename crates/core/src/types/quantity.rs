//! Validated line-item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A strictly positive quantity.
///
/// Constructed from raw (possibly signed, possibly textual) input. Zero,
/// negative, overflowing and non-numeric input all yield `None`; callers treat
/// that as "leave state unchanged" rather than as an error.
///
/// ```
/// use rethread_core::Quantity;
///
/// assert_eq!(Quantity::new(3).map(Quantity::get), Some(3));
/// assert!(Quantity::new(0).is_none());
/// assert!(Quantity::new(-1).is_none());
/// assert!(Quantity::parse("two").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Validate a raw signed quantity.
    #[must_use]
    pub fn new(raw: i64) -> Option<Self> {
        u32::try_from(raw).ok().and_then(NonZeroU32::new).map(Self)
    }

    /// Parse a quantity typed by a user.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<i64>().ok().and_then(Self::new)
    }

    /// The quantity as a plain integer (always >= 1).
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert!(Quantity::new(0).is_none());
        assert!(Quantity::new(-1).is_none());
        assert!(Quantity::new(i64::MIN).is_none());
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(Quantity::new(i64::from(u32::MAX) + 1).is_none());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Quantity::parse(" 4 ").map(Quantity::get), Some(4));
        assert!(Quantity::parse("").is_none());
        assert!(Quantity::parse("1.5").is_none());
        assert!(Quantity::parse("-2").is_none());
    }

    #[test]
    fn test_one() {
        assert_eq!(Quantity::ONE.get(), 1);
    }
}
