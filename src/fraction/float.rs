//! Conversions between [`Fraction`] and `f64`.

use num_traits::float::FloatCore;
use num_traits::{FromPrimitive, ToPrimitive};
use tracing::{debug, trace};

use super::Fraction;
use crate::error::{FractionError, Result};

/// Largest magnitude [`Fraction::from_f64_exact`] accepts (just below 2^63).
pub const MAX_EXACT_MAGNITUDE: f64 = 9.223372036854775e18;

/// Magnitudes below this (2^-62) convert to zero.
pub const MIN_EXACT_MAGNITUDE: f64 = 2.168404344971009e-19;

/// Upper bound on continued-fraction steps in [`Fraction::from_f64_approx`].
pub const MAX_CONVERGENT_STEPS: usize = 1000;

/// Largest power of two used as a denominator by the exact conversion.
const DEN_SHIFT_CAP: i64 = 62;

/// 2^64, the first value whose integer part no longer fits a `u64`.
const APPROX_LIMIT: f64 = 18_446_744_073_709_551_616.0;

impl Fraction {
    pub fn to_f64(&self) -> f64 {
        let value = self.numerator as f64 / self.denominator as f64;
        if self.negative && self.numerator != 0 {
            -value
        } else {
            value
        }
    }

    /// Converts the binary value of `x` into a fraction.
    ///
    /// The result is the float's exact value, so `-0.3` becomes
    /// `-5404319552844595/18014398509481984`; use
    /// [`Fraction::from_f64_approx`] or [`Fraction::parse_decimal`] to get
    /// `-3/10`.
    ///
    /// Denominators are capped at 2^62. A value that would need a larger
    /// one (only possible close to [`MIN_EXACT_MAGNITUDE`]) has its lowest
    /// numerator bits dropped instead, so the result is then an
    /// approximation rather than an error.
    pub fn from_f64_exact(x: f64) -> Result<Fraction> {
        if x.is_nan() {
            return Err(FractionError::Invalid);
        }
        if x.is_infinite() || x.abs() > MAX_EXACT_MAGNITUDE {
            debug!(x, "float magnitude out of range");
            return Err(FractionError::OutOfRange);
        }
        if x.abs() < MIN_EXACT_MAGNITUDE {
            return Ok(Self::ZERO);
        }

        // normal here, so the mantissa carries its implicit leading bit
        let (mut mantissa, exponent, sign) = FloatCore::integer_decode(x);

        // value = mantissa / 2^shift
        let mut shift = -(exponent as i64);
        while mantissa & 1 == 0 && shift > 0 {
            mantissa >>= 1;
            shift -= 1;
        }

        let (shift_num, shift_den) = if shift > DEN_SHIFT_CAP {
            (shift - DEN_SHIFT_CAP, DEN_SHIFT_CAP)
        } else if shift > 0 {
            (0, shift)
        } else {
            (shift, 0)
        };

        let numerator = if shift_num < 0 {
            mantissa
                .checked_mul(1u64 << -shift_num)
                .ok_or(FractionError::OutOfRange)?
        } else {
            if shift_num > 0 {
                trace!(x, dropped_bits = shift_num, "denominator capped, numerator truncated");
            }
            mantissa.checked_shr(shift_num as u32).unwrap_or(0)
        };
        let denominator = 1u64 << shift_den;

        Ok(Self::normalized(numerator, denominator, sign < 0))
    }

    /// Best rational approximation of `x` whose denominator does not exceed
    /// `max_denominator`, found by walking the continued-fraction
    /// convergents.
    ///
    /// The walk stops at the bound, when the next convergent would overflow
    /// a `u64`, or after [`MAX_CONVERGENT_STEPS`] terms. The last convergent
    /// that fit is returned.
    pub fn from_f64_approx(x: f64, max_denominator: u64) -> Result<Fraction> {
        if x.is_nan() || max_denominator == 0 {
            return Err(FractionError::Invalid);
        }
        if x.is_infinite() || x.abs() >= APPROX_LIMIT {
            debug!(x, "float magnitude out of range");
            return Err(FractionError::OutOfRange);
        }
        if x == 0.0 {
            return Ok(Self::ZERO);
        }

        let terms = ContinuedFraction::new(x.abs());
        let (p, q) = best_convergent(terms, max_denominator, MAX_CONVERGENT_STEPS);
        if q == 0 {
            return Err(FractionError::OutOfRange);
        }
        Ok(Self::normalized(p, q, x < 0.0))
    }
}

/// Terms of the continued-fraction expansion of a non-negative float.
///
/// Ends when the remainder is exact or when the next term would not fit a
/// `u64`.
struct ContinuedFraction {
    x: f64,
    done: bool,
}

impl ContinuedFraction {
    fn new(x: f64) -> Self {
        ContinuedFraction { x, done: false }
    }
}

impl Iterator for ContinuedFraction {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        if self.x >= APPROX_LIMIT {
            trace!(x = self.x, "next term does not fit a u64");
            self.done = true;
            return None;
        }

        // below 2^64 here, so the cast is exact
        let a = self.x.floor() as u64;
        let frac_part = self.x - a as f64;
        if frac_part == 0.0 {
            self.done = true;
        } else {
            self.x = 1.0 / frac_part;
        }
        Some(a)
    }
}

/// `a * h + h_prev`, or `None` on overflow.
fn next_convergent(a: u64, h: u64, h_prev: u64) -> Option<u64> {
    a.checked_mul(h).and_then(|v| v.checked_add(h_prev))
}

/// Folds continued-fraction terms into the last convergent `(p, q)` with
/// `q <= max_denominator`. `q` is zero only if `terms` is empty.
fn best_convergent(
    terms: impl IntoIterator<Item = u64>,
    max_denominator: u64,
    max_steps: usize,
) -> (u64, u64) {
    let (mut p_prev, mut q_prev) = (0u64, 1u64);
    let (mut p, mut q) = (1u64, 0u64);

    for (step, a) in terms.into_iter().take(max_steps).enumerate() {
        let (new_p, new_q) = match (next_convergent(a, p, p_prev), next_convergent(a, q, q_prev)) {
            (Some(np), Some(nq)) => (np, nq),
            _ => {
                trace!(step, a, "next convergent overflows");
                break;
            }
        };
        if new_q == 0 || new_q > max_denominator {
            break;
        }

        (p_prev, q_prev) = (p, q);
        (p, q) = (new_p, new_q);
        trace!(step, p, q, "convergent");
    }

    (p, q)
}

impl TryFrom<f64> for Fraction {
    type Error = FractionError;

    fn try_from(x: f64) -> Result<Self> {
        Fraction::from_f64_exact(x)
    }
}

impl ToPrimitive for Fraction {
    /// Integer part, truncated toward zero.
    fn to_i64(&self) -> Option<i64> {
        let trunc = (self.numerator / self.denominator) as i128;
        i64::try_from(if self.negative { -trunc } else { trunc }).ok()
    }

    /// Integer part, truncated toward zero. `None` below -1.
    fn to_u64(&self) -> Option<u64> {
        let trunc = self.numerator / self.denominator;
        if self.negative && trunc != 0 {
            None
        } else {
            Some(trunc)
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Fraction::to_f64(self))
    }
}

impl FromPrimitive for Fraction {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Fraction::from_integer(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Fraction::from_integer(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        Fraction::from_f64_exact(n).ok()
    }
}
