//! Overflow-checked arithmetic.
//!
//! Every intermediate product or sum is checked before it is formed. An
//! operation whose exact result would not fit returns
//! [`FractionError::OutOfRange`] instead of wrapping.

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Inv;
use tracing::debug;

use super::Fraction;
use crate::error::{FractionError, Result};
use crate::utils::int::gcd;

/// Signed sum of two magnitudes sharing a denominator.
///
/// Same signs add (and may overflow); different signs subtract and keep the
/// sign of the larger side.
fn combine(a: u64, a_neg: bool, b: u64, b_neg: bool) -> Result<(u64, bool)> {
    if a_neg == b_neg {
        let sum = a.checked_add(b).ok_or_else(|| {
            debug!(a, b, "numerator sum overflows");
            FractionError::OutOfRange
        })?;
        Ok((sum, a_neg))
    } else if a >= b {
        Ok((a - b, a_neg))
    } else {
        Ok((b - a, b_neg))
    }
}

fn checked_product(a: u64, b: u64, what: &'static str) -> Result<u64> {
    a.checked_mul(b).ok_or_else(|| {
        debug!(a, b, what, "product overflows");
        FractionError::OutOfRange
    })
}

impl Fraction {
    pub fn checked_add(self, other: Fraction) -> Result<Fraction> {
        if self.is_zero() {
            return Ok(Self::normalized(other.numerator, other.denominator, other.negative));
        }
        if other.is_zero() {
            return Ok(Self::normalized(self.numerator, self.denominator, self.negative));
        }

        if self.denominator == other.denominator {
            let (num, neg) = combine(self.numerator, self.negative, other.numerator, other.negative)?;
            return Ok(Self::normalized(num, self.denominator, neg));
        }

        let g = gcd(self.denominator, other.denominator);
        let scale_self = other.denominator / g;
        let scale_other = self.denominator / g;

        let a = checked_product(self.numerator, scale_self, "scaled numerator")?;
        let b = checked_product(other.numerator, scale_other, "scaled numerator")?;
        let den = checked_product(scale_other, other.denominator, "common denominator")?;

        let (num, neg) = combine(a, self.negative, b, other.negative)?;
        Ok(Self::normalized(num, den, neg))
    }

    pub fn checked_sub(self, other: Fraction) -> Result<Fraction> {
        self.checked_add(other.negate())
    }

    pub fn checked_mul(self, other: Fraction) -> Result<Fraction> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::ZERO);
        }

        // cross-cancel first so the products stay as small as possible
        let g1 = gcd(self.numerator, other.denominator);
        let g2 = gcd(other.numerator, self.denominator);

        let n1 = self.numerator / g1;
        let d2 = other.denominator / g1;
        let n2 = other.numerator / g2;
        let d1 = self.denominator / g2;

        let num = checked_product(n1, n2, "numerator")?;
        let den = checked_product(d1, d2, "denominator")?;

        Ok(Self::normalized(num, den, self.negative != other.negative))
    }

    /// Division by zero surfaces as [`FractionError::ZeroDenominator`].
    pub fn checked_div(self, other: Fraction) -> Result<Fraction> {
        self.checked_mul(other.invert()?)
    }

    /// Flips the sign. Zero stays positive.
    pub fn negate(self) -> Fraction {
        if self.is_zero() {
            return Self::ZERO;
        }
        Fraction {
            negative: !self.negative,
            ..self
        }
    }

    /// Swaps numerator and denominator, keeping the sign.
    pub fn invert(self) -> Result<Fraction> {
        if self.is_zero() {
            return Err(FractionError::ZeroDenominator);
        }
        Ok(Fraction {
            numerator: self.denominator,
            denominator: self.numerator,
            negative: self.negative,
        })
    }

    pub fn abs(self) -> Fraction {
        Fraction {
            negative: false,
            ..self
        }
    }
}

macro_rules! impl_fallible_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for Fraction {
            type Output = Result<Fraction>;

            fn $method(self, other: Fraction) -> Result<Fraction> {
                self.$checked(other)
            }
        }

        impl $trait for &Fraction {
            type Output = Result<Fraction>;

            fn $method(self, other: &Fraction) -> Result<Fraction> {
                self.$checked(*other)
            }
        }
    };
}

impl_fallible_op!(Add, add, checked_add);
impl_fallible_op!(Sub, sub, checked_sub);
impl_fallible_op!(Mul, mul, checked_mul);
impl_fallible_op!(Div, div, checked_div);

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        self.negate()
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        self.negate()
    }
}

impl Inv for Fraction {
    type Output = Result<Fraction>;

    fn inv(self) -> Result<Fraction> {
        self.invert()
    }
}
