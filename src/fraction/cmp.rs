use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::Fraction;
use crate::utils::int::{cmp_wide, gcd, mul_wide};

impl Fraction {
    /// Total order on values.
    ///
    /// Magnitudes are compared as `a * (d2/g)` against `c * (d1/g)` with
    /// `g = gcd(d1, d2)`, using 128-bit products so the cross
    /// multiplication can never overflow.
    pub fn cmp_value(&self, other: &Fraction) -> Ordering {
        if self.is_zero() && other.is_zero() {
            return Ordering::Equal;
        }

        if self.negative != other.negative {
            return if self.negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let g = gcd(self.denominator, other.denominator);
        let lmul = other.denominator / g;
        let rmul = self.denominator / g;

        let ord = cmp_wide(
            mul_wide(self.numerator, lmul),
            mul_wide(other.numerator, rmul),
        );

        // both negative here: larger magnitude is the smaller value
        if self.negative {
            ord.reverse()
        } else {
            ord
        }
    }

    pub fn less(&self, other: &Fraction) -> bool {
        self.cmp_value(other) == Ordering::Less
    }

    pub fn less_eq(&self, other: &Fraction) -> bool {
        self.cmp_value(other) != Ordering::Greater
    }

    pub fn greater(&self, other: &Fraction) -> bool {
        self.cmp_value(other) == Ordering::Greater
    }

    pub fn greater_eq(&self, other: &Fraction) -> bool {
        self.cmp_value(other) != Ordering::Less
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() && other.is_zero() {
            return true;
        }
        self.numerator == other.numerator
            && self.denominator == other.denominator
            && self.negative == other.negative
    }
}

impl Eq for Fraction {}

impl Hash for Fraction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_zero() {
            0u64.hash(state);
            return;
        }
        self.numerator.hash(state);
        self.denominator.hash(state);
        self.negative.hash(state);
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_value(other)
    }
}
