//! Error types for fraction construction, arithmetic and parsing.

use thiserror::Error;

/// Everything that can go wrong while building or combining fractions.
///
/// Failures are always detected before the offending operation runs, so an
/// error never hides a wrapped value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    /// A denominator of zero, from construction, parsing or inversion.
    #[error("denominator cannot be zero")]
    ZeroDenominator,

    /// A magnitude that does not fit the 64-bit numerator or denominator.
    #[error("the number is out of range for a 64-bit fraction")]
    OutOfRange,

    /// NaN input, a zero approximation bound, or a malformed rational literal.
    #[error("invalid conversion")]
    Invalid,

    /// Malformed decimal literal.
    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: &'static str },
}

impl FractionError {
    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        FractionError::Parse {
            input: input.to_string(),
            reason,
        }
    }
}

pub type Result<T, E = FractionError> = std::result::Result<T, E>;
