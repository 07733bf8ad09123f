//! Fluent operation chains.
//!
//! ```
//! use exact_frac::prelude::*;
//!
//! let half = Fraction::must_new(1, 2);
//! let res = Chain::start(half)
//!     .sum(Fraction::must_new(2, 3))
//!     .sub(Fraction::must_new(1, 6))
//!     .result();
//! assert_eq!(res, Ok(Fraction::one()));
//! ```

use crate::error::{FractionError, Result};
use crate::fraction::Fraction;

/// A running value plus the first error hit, if any.
///
/// Once an error is recorded every later step is skipped and
/// [`Chain::result`] hands that error back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a chain does nothing until `result` is called"]
pub struct Chain {
    value: Fraction,
    error: Option<FractionError>,
}

impl Chain {
    pub fn start(initial: Fraction) -> Self {
        Chain {
            value: initial,
            error: None,
        }
    }

    fn apply(self, op: impl FnOnce(Fraction) -> Result<Fraction>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match op(self.value) {
            Ok(value) => Chain { value, error: None },
            Err(e) => Chain {
                value: self.value,
                error: Some(e),
            },
        }
    }

    pub fn sum(self, other: Fraction) -> Self {
        self.apply(|v| v.checked_add(other))
    }

    pub fn sub(self, other: Fraction) -> Self {
        self.apply(|v| v.checked_sub(other))
    }

    pub fn mult(self, other: Fraction) -> Self {
        self.apply(|v| v.checked_mul(other))
    }

    pub fn div(self, other: Fraction) -> Self {
        self.apply(|v| v.checked_div(other))
    }

    pub fn negate(self) -> Self {
        self.apply(|v| Ok(v.negate()))
    }

    pub fn invert(self) -> Self {
        self.apply(Fraction::invert)
    }

    pub fn abs(self) -> Self {
        self.apply(|v| Ok(v.abs()))
    }

    /// The value so far, and the error that stopped the chain if any.
    pub fn peek(&self) -> (Fraction, Option<&FractionError>) {
        (self.value, self.error.as_ref())
    }

    pub fn result(self) -> Result<Fraction> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.value),
        }
    }
}

impl Fraction {
    pub fn chain(self) -> Chain {
        Chain::start(self)
    }
}
