//! Text to [`Fraction`].
//!
//! Two notations are understood: rational (`-6/8`) and decimal (`-0.75`).
//! Neither accepts an explicit `+` or a sign after the leading one.

use std::str::FromStr;

use tracing::debug;

use super::Fraction;
use crate::error::{FractionError, Result};
use crate::utils::int::pow10;

/// Parses a run of ASCII digits. Unlike `u64::from_str` this refuses a
/// leading `+`.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Decimal digit run: non-digits are a parse error, a value past `u64::MAX`
/// is `OutOfRange`.
fn decimal_digits(input: &str, digits: &str, reason: &'static str) -> Result<u64> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FractionError::parse(input, reason));
    }
    digits.parse().map_err(|_| {
        debug!(input, digits, "decimal digits overflow");
        FractionError::OutOfRange
    })
}

fn invalid(input: &str, reason: &'static str) -> FractionError {
    debug!(input, reason, "rejected rational literal");
    FractionError::Invalid
}

impl Fraction {
    /// Parses either notation: input containing `/` is rational, anything
    /// else decimal.
    pub fn parse(s: &str) -> Result<Fraction> {
        if s.trim().contains('/') {
            Self::parse_rational(s)
        } else {
            Self::parse_decimal(s)
        }
    }

    /// Parses `["-"] digits ["/" digits]`.
    ///
    /// Whitespace is allowed around the whole input, after the sign and
    /// around either side of the `/`. The denominator cannot carry a sign.
    pub fn parse_rational(input: &str) -> Result<Fraction> {
        let mut s = input.trim();
        if s.is_empty() {
            return Err(invalid(input, "empty fraction"));
        }

        let mut negative = false;
        if let Some(rest) = s.strip_prefix('-') {
            negative = true;
            s = rest.trim();
            if s.is_empty() {
                return Err(invalid(input, "no digits after sign"));
            }
        }

        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() > 2 {
            return Err(invalid(input, "too many fraction separators"));
        }

        let numerator = parts[0].trim();
        if numerator.is_empty() {
            return Err(invalid(input, "empty numerator"));
        }
        let numerator = parse_digits(numerator)
            .ok_or_else(|| invalid(input, "numerator is not a 64-bit unsigned integer"))?;

        let denominator = match parts.get(1) {
            None => 1,
            Some(den) => {
                let den = den.trim();
                if den.is_empty() {
                    return Err(invalid(input, "empty denominator"));
                }
                let den = parse_digits(den)
                    .ok_or_else(|| invalid(input, "denominator is not a 64-bit unsigned integer"))?;
                if den == 0 {
                    return Err(FractionError::ZeroDenominator);
                }
                den
            }
        };

        Ok(Self::normalized(numerator, denominator, negative))
    }

    /// Parses `["-"] digits ["." digits]` into the exact value it denotes,
    /// so `"-0.3"` is `-3/10`.
    ///
    /// The sign applies to the whole number. Trailing zeros after the point
    /// are ignored; the remaining fractional digits set the denominator to
    /// `10^digits`, so at most 19 of them fit. Anything that does not fit 64
    /// bits is [`FractionError::OutOfRange`].
    pub fn parse_decimal(input: &str) -> Result<Fraction> {
        let mut s = input.trim();
        if s.is_empty() {
            return Err(FractionError::parse(input, "empty number"));
        }

        let mut negative = false;
        if let Some(rest) = s.strip_prefix('-') {
            negative = true;
            s = rest;
        }

        let mut parts = s.split('.');
        let int_part = parts.next().unwrap_or_default();
        let frac_part = parts.next();
        if parts.next().is_some() {
            return Err(FractionError::parse(input, "too many dots"));
        }

        if int_part.is_empty() {
            return Err(FractionError::parse(input, "no digits before the decimal point"));
        }
        let int_value = decimal_digits(input, int_part, "integer part is not made of digits")?;
        let whole = Fraction::from_integer(int_value);

        let value = match frac_part {
            None => whole,
            Some(digits) => {
                if digits.is_empty() {
                    return Err(FractionError::parse(input, "no digits after the decimal point"));
                }
                let significant = digits.trim_end_matches('0');
                if significant.is_empty() {
                    whole
                } else {
                    let frac_value =
                        decimal_digits(input, significant, "fractional part is not made of digits")?;
                    let scale = pow10(significant.len()).ok_or_else(|| {
                        debug!(input, digits = significant.len(), "too many fractional digits");
                        FractionError::OutOfRange
                    })?;
                    whole.checked_add(Self::normalized(frac_value, scale, false))?
                }
            }
        };

        Ok(if negative { value.negate() } else { value })
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self> {
        Fraction::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::must_new(n, d)
    }

    #[test]
    fn test_parse_rational_valid() {
        let cases = [
            ("3/4", "3/4"),
            ("  5/1  ", "5"),
            ("-10/7", "-10/7"),
            ("0/999", "0"),
            ("-0/5", "0"),
            ("42", "42"),
            ("  12 / 6  ", "2"),
            (" - 6/ 8 ", "-3/4"),
            ("18446744073709551615/3", "6148914691236517205"),
        ];
        for (input, want) in cases {
            let f = Fraction::parse_rational(input).unwrap();
            assert_eq!(f.to_string(), want, "parse_rational({:?})", input);
        }
    }

    #[test]
    fn test_parse_rational_invalid() {
        let bad = [
            "", "/", " / ", "abc", "1//2", "1/2/3", "+", "-", "+/", "+1/2",
            "6/-11", "-/7", "1/-", "1/", "1.5/2", "18446744073709551616/1",
        ];
        for input in bad {
            assert_eq!(
                Fraction::parse_rational(input),
                Err(FractionError::Invalid),
                "parse_rational({:?}) should fail",
                input
            );
        }
    }

    #[test]
    fn test_parse_rational_zero_denominator() {
        assert_eq!(Fraction::parse_rational("1/0"), Err(FractionError::ZeroDenominator));
        assert_eq!(Fraction::parse_rational("-0/0"), Err(FractionError::ZeroDenominator));
    }

    #[test]
    fn test_parse_decimal() {
        let cases = [
            ("-0.3", frac(-3, 10)),
            ("0.2", frac(2, 10)),
            ("0.5", frac(1, 2)),
            ("2.5", frac(5, 2)),
            ("0.05", frac(1, 20)),
            ("-12.125", frac(-97, 8)),
            ("7", frac(7, 1)),
            ("-7", frac(-7, 1)),
            (" 3.000 ", frac(3, 1)),
            ("-0.0", Fraction::zero()),
        ];
        for (input, want) in cases {
            let f = Fraction::parse_decimal(input).unwrap();
            assert_eq!(f, want, "parse_decimal({:?}) = {}", input, f);
        }
        assert_eq!(Fraction::parse_decimal("-0.3").unwrap().to_string(), "-3/10");
        assert_eq!(Fraction::parse_decimal("2.5").unwrap().to_string(), "5/2");
    }

    #[test]
    fn test_parse_decimal_invalid() {
        for input in ["", "-", ".5", "-.5", "1.2.3", "2.", "abc", "1.x", "+1.5", "1.-5", "- 1.5"] {
            match Fraction::parse_decimal(input) {
                Err(FractionError::Parse { .. }) => {}
                other => panic!("parse_decimal({:?}) = {:?}, want a parse error", input, other),
            }
        }
    }

    #[test]
    fn test_parse_decimal_limits() {
        let f = Fraction::parse_decimal("0.1234567890123456789").unwrap();
        assert_eq!(f.denominator(), 10_000_000_000_000_000_000);
        assert_eq!(
            Fraction::parse_decimal("0.12345678901234567891"),
            Err(FractionError::OutOfRange)
        );
        assert_eq!(
            Fraction::parse_decimal("0.00000000000000000001"),
            Err(FractionError::OutOfRange)
        );
        assert_eq!(
            Fraction::parse_decimal("18446744073709551616"),
            Err(FractionError::OutOfRange)
        );
        assert_eq!(
            Fraction::parse_decimal("-18446744073709551616.5"),
            Err(FractionError::OutOfRange)
        );
        // the whole value overflows once the integer part is added
        assert_eq!(
            Fraction::parse_decimal("18446744073709551615.5"),
            Err(FractionError::OutOfRange)
        );
    }

    #[test]
    fn test_parse_decimal_trailing_zeros() {
        assert_eq!(Fraction::parse_decimal("1.50000000000000000000").unwrap(), frac(3, 2));
        let f = Fraction::parse_decimal("-0.1234567890123456789000").unwrap();
        assert_eq!(f.denominator(), 10_000_000_000_000_000_000);
        assert_eq!(Fraction::parse_decimal("4.000000000000000000000000").unwrap(), frac(4, 1));
        assert!(matches!(Fraction::parse_decimal("1.x00"), Err(FractionError::Parse { .. })));
    }

    #[test]
    fn test_parse_dispatch() {
        assert_eq!(Fraction::parse(" 6/8 ").unwrap(), frac(3, 4));
        assert_eq!(Fraction::parse("0.75").unwrap(), frac(3, 4));
        assert_eq!("-1/3".parse::<Fraction>().unwrap(), frac(-1, 3));
        assert!(matches!("1.5/2".parse::<Fraction>(), Err(FractionError::Invalid)));
        assert!(matches!("x".parse::<Fraction>(), Err(FractionError::Parse { .. })));
    }

    #[test]
    fn test_display_round_trip() {
        for f in [frac(3, 4), frac(-10, 7), frac(5, 1), frac(-9, 1), Fraction::zero()] {
            assert_eq!(Fraction::parse(&f.to_string()).unwrap(), f);
        }
    }
}
