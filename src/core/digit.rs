//! Digit-valued pieces.
//!
//! Every piece in the game carries a digit 0-9. The duel ranking over
//! digits is deliberately non-transitive (see [`crate::duel`]); this type
//! only guarantees the 0-9 range.

use serde::{Deserialize, Serialize};

/// A piece value: a digit in 0..=9.
///
/// Construction is checked; a `Digit` in hand is always in range.
///
/// ```
/// use digit_duel::core::Digit;
///
/// let d = Digit::new(7);
/// assert_eq!(d.value(), 7);
/// assert!(Digit::try_from(10u8).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

/// Error for out-of-range digit values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("digit out of range (got={0}, max=9)")]
pub struct DigitOutOfRange(pub u8);

impl Digit {
    /// Create a digit, panicking if out of range.
    ///
    /// Use `try_from` for untrusted input.
    #[must_use]
    pub fn new(value: u8) -> Self {
        assert!(value <= 9, "digit must be 0-9, got {}", value);
        Self(value)
    }

    /// The raw digit value (0-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterate over all ten digits in ascending order.
    pub fn all() -> impl Iterator<Item = Digit> {
        (0..=9).map(Digit)
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(DigitOutOfRange(value))
        }
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.0
    }
}

impl std::fmt::Display for Digit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
