//! Positive result-size bounds.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Maximum number of results a ranked operation returns.
///
/// A `Limit` is always at least one. Zero, negative and non-numeric inputs
/// are rejected rather than clamped to a default.
///
/// # Examples
/// ```
/// use neighborfit_core::Limit;
///
/// assert_eq!("5".parse::<Limit>().map(Limit::get), Ok(5));
/// assert!("0".parse::<Limit>().is_err());
/// assert!("ten".parse::<Limit>().is_err());
/// assert!(Limit::try_from(-3_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Limit(NonZeroUsize);

impl Limit {
    /// Build a limit from a count, rejecting zero.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidLimit`] when `value` is zero.
    pub fn new(value: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidLimit(value.to_string()))
    }

    /// Wrap a value that is already known to be positive.
    #[must_use]
    pub const fn from_non_zero(value: NonZeroUsize) -> Self {
        Self(value)
    }

    /// Return the bound as a plain count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for Limit {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidLimit(value.to_string()))
    }
}

impl From<Limit> for u64 {
    fn from(limit: Limit) -> Self {
        u64::try_from(limit.get()).unwrap_or(Self::MAX)
    }
}

impl FromStr for Limit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: i64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidLimit(s.to_owned()))?;
        Self::try_from(parsed)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case(" 25 ", 25)]
    fn parses_positive(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(input.parse::<Limit>().map(Limit::get), Ok(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("2.5")]
    #[case("")]
    #[case("many")]
    fn rejects_non_positive_or_non_numeric(#[case] input: &str) {
        let err = input.parse::<Limit>().expect_err("invalid limit");
        assert!(matches!(err, ValidationError::InvalidLimit(_)));
    }

    #[rstest]
    fn zero_count_is_rejected() {
        assert!(Limit::new(0).is_err());
    }
}
