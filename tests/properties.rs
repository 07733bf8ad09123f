use std::cmp::Ordering;

use exact_frac::{Fraction, FractionError};
use num_bigint::BigInt;
use proptest::prelude::*;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn build(n: u64, d: u64, negative: bool) -> Fraction {
    let f = Fraction::new(n, d).unwrap();
    if negative {
        f.negate()
    } else {
        f
    }
}

/// Signed numerator and denominator as big integers.
fn big(f: &Fraction) -> (BigInt, BigInt) {
    let n = BigInt::from(f.numerator());
    (if f.is_negative() { -n } else { n }, BigInt::from(f.denominator()))
}

fn same_value(f: &Fraction, num: &BigInt, den: &BigInt) -> bool {
    let (fnum, fden) = big(f);
    fnum * den == num * fden
}

fn any_fraction() -> impl Strategy<Value = Fraction> {
    (any::<u64>(), 1..=u64::MAX, any::<bool>()).prop_map(|(n, d, s)| build(n, d, s))
}

fn small_fraction() -> impl Strategy<Value = Fraction> {
    (-(1i64 << 30)..(1i64 << 30), 1i64..(1i64 << 30)).prop_map(|(n, d)| Fraction::must_new(n, d))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn new_is_reduced_with_xor_sign(n in any::<i64>(), d in any::<i64>().prop_filter("non-zero", |d| *d != 0)) {
        let f = Fraction::new(n, d).unwrap();
        if n == 0 {
            prop_assert_eq!(f, Fraction::zero());
            prop_assert!(!f.is_negative());
            prop_assert_eq!(f.denominator(), 1);
        } else {
            prop_assert_eq!(gcd(f.numerator(), f.denominator()), 1);
            prop_assert_eq!(f.is_negative(), (n < 0) != (d < 0));
        }
    }

    #[test]
    fn zero_is_unique(d in any::<i64>().prop_filter("non-zero", |d| *d != 0)) {
        let z = Fraction::new(0, d).unwrap();
        prop_assert_eq!(z, Fraction::from_integer(0));
        prop_assert_eq!(z.negate(), z);
        prop_assert_eq!(z.to_string(), "0");
    }

    #[test]
    fn add_commutes(a in any_fraction(), b in any_fraction()) {
        prop_assert_eq!(a.checked_add(b), b.checked_add(a));
    }

    #[test]
    fn add_is_exact_when_it_succeeds(a in any_fraction(), b in any_fraction()) {
        if let Ok(sum) = a.checked_add(b) {
            let ((an, ad), (bn, bd)) = (big(&a), big(&b));
            prop_assert!(same_value(&sum, &(an * &bd + bn * &ad), &(ad * bd)));
        }
    }

    #[test]
    fn small_add_never_overflows(a in small_fraction(), b in small_fraction()) {
        let sum = a.checked_add(b);
        prop_assert!(sum.is_ok());
        prop_assert_eq!(a.checked_add(Fraction::zero()), Ok(a));
    }

    #[test]
    fn sub_self_is_zero(a in any_fraction()) {
        let d = a.checked_sub(a).unwrap();
        prop_assert_eq!(d, Fraction::zero());
        prop_assert!(!d.is_negative());
    }

    #[test]
    fn mul_is_exact_when_it_succeeds(a in any_fraction(), b in any_fraction()) {
        match a.checked_mul(b) {
            Ok(p) => {
                let ((an, ad), (bn, bd)) = (big(&a), big(&b));
                prop_assert!(same_value(&p, &(an * bn), &(ad * bd)));
                prop_assert_eq!(gcd(p.numerator(), p.denominator()), 1);
            }
            Err(e) => prop_assert_eq!(e, FractionError::OutOfRange),
        }
    }

    #[test]
    fn mul_identities(a in any_fraction()) {
        prop_assert_eq!(a.checked_mul(Fraction::one()), Ok(a));
        let z = a.checked_mul(Fraction::zero()).unwrap();
        prop_assert_eq!(z, Fraction::zero());
        prop_assert!(!z.is_negative());
    }

    #[test]
    fn div_by_zero_fails(a in any_fraction()) {
        prop_assert_eq!(a.checked_div(Fraction::zero()), Err(FractionError::ZeroDenominator));
    }

    #[test]
    fn invert_twice_is_identity(a in any_fraction()) {
        if a.is_zero() {
            prop_assert_eq!(a.invert(), Err(FractionError::ZeroDenominator));
        } else {
            prop_assert_eq!(a.invert().and_then(Fraction::invert), Ok(a));
        }
    }

    #[test]
    fn cmp_matches_big_integers(a in any_fraction(), b in any_fraction()) {
        let ((an, ad), (bn, bd)) = (big(&a), big(&b));
        let want = (an * bd).cmp(&(bn * ad));
        prop_assert_eq!(a.cmp(&b), want);
        prop_assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn cmp_agrees_with_floats(a in small_fraction(), b in small_fraction()) {
        if a < b {
            prop_assert!(a.to_f64() <= b.to_f64());
        }
    }

    #[test]
    fn display_round_trips(a in any_fraction()) {
        prop_assert_eq!(Fraction::parse(&a.to_string()), Ok(a));
        prop_assert_eq!(a.to_string().parse::<Fraction>(), Ok(a));
    }

    #[test]
    fn exact_float_round_trips(x in 1e-3f64..1e18, negative in any::<bool>()) {
        let x = if negative { -x } else { x };
        let f = Fraction::from_f64_exact(x).unwrap();
        prop_assert_eq!(f.to_f64(), x);
        prop_assert!(f.denominator().is_power_of_two());
    }

    #[test]
    fn approx_respects_bound(x in -1e6f64..1e6, max_den in 1u64..1_000_000) {
        let f = Fraction::from_f64_approx(x, max_den).unwrap();
        prop_assert!(f.denominator() <= max_den);
        let err = (f.to_f64() - x).abs();
        prop_assert!(err <= 1.0 / max_den as f64 + 1e-9 * x.abs().max(1.0), "x={} f={} err={}", x, f, err);
    }
}
