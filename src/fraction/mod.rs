//! The exact fraction value type.
//!
//! A [`Fraction`] keeps its magnitude as two `u64` values and its sign as a
//! separate flag. Every value is kept in lowest terms with a unique zero
//! (`0/1`, positive), which lets equality compare fields directly.

use std::fmt::{Display, Formatter};

use crate::error::{FractionError, Result};
use crate::utils::int::{gcd, Integer};

pub mod arith;

pub mod cmp;

pub mod float;

pub mod parse;

/// A reduced fraction with a 64-bit numerator and denominator.
///
/// Values are immutable; every operation returns a new fraction.
#[derive(Clone, Copy, Debug)]
pub struct Fraction {
    numerator: u64,
    denominator: u64,
    negative: bool,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction {
        numerator: 0,
        denominator: 1,
        negative: false,
    };

    pub const ONE: Fraction = Fraction {
        numerator: 1,
        denominator: 1,
        negative: false,
    };

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn one() -> Self {
        Self::ONE
    }

    /// Creates `numerator / denominator` in lowest terms.
    ///
    /// Both arguments may be any integer type up to 64 bits, signed or not.
    /// The result is negative when exactly one of them is.
    pub fn new<N: Integer, D: Integer>(numerator: N, denominator: D) -> Result<Self> {
        if denominator.is_zero() {
            return Err(FractionError::ZeroDenominator);
        }
        if numerator.is_zero() {
            return Ok(Self::ZERO);
        }

        let negative = numerator.is_negative() != denominator.is_negative();
        Ok(Self::normalized(
            numerator.unsigned_abs_u64(),
            denominator.unsigned_abs_u64(),
            negative,
        ))
    }

    /// Like [`Fraction::new`], but panics on a zero denominator.
    ///
    /// Only for call sites that have already ruled that out, such as
    /// constants and tests.
    ///
    /// # Panics
    ///
    /// When `denominator` is zero.
    pub fn must_new<N: Integer, D: Integer>(numerator: N, denominator: D) -> Self {
        match Self::new(numerator, denominator) {
            Ok(f) => f,
            Err(e) => panic!("Fraction::must_new: {}", e),
        }
    }

    pub fn from_integer<T: Integer>(value: T) -> Self {
        if value.is_zero() {
            return Self::ZERO;
        }
        Fraction {
            numerator: value.unsigned_abs_u64(),
            denominator: 1,
            negative: value.is_negative(),
        }
    }

    /// Reduces by the gcd and folds every zero into the canonical one.
    ///
    /// `denominator` must be non-zero. Idempotent.
    pub(crate) fn normalized(numerator: u64, denominator: u64, negative: bool) -> Self {
        debug_assert_ne!(denominator, 0, "normalized with a zero denominator");
        if numerator == 0 {
            return Self::ZERO;
        }
        let g = gcd(numerator, denominator);
        Fraction {
            numerator: numerator / g,
            denominator: denominator / g,
            negative,
        }
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {$(
        impl From<$t> for Fraction {
            fn from(value: $t) -> Self {
                Fraction::from_integer(value)
            }
        }
    )*};
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.numerator == 0 {
            return write!(f, "0");
        }
        if self.negative {
            write!(f, "-")?;
        }
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}
