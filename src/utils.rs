pub mod int {
    use std::cmp::Ordering;

    use num_traits::PrimInt;

    mod sealed {
        pub trait Sealed {}
    }

    /// Any standard integer type that fits in 64 bits.
    ///
    /// Constructors accept these so callers never have to cast by hand. The
    /// magnitude of every value, including the minimum of a signed type,
    /// fits in a `u64`.
    pub trait Integer: PrimInt + sealed::Sealed {
        fn is_negative(self) -> bool;

        fn unsigned_abs_u64(self) -> u64;
    }

    macro_rules! impl_signed {
        ($($t:ty),*) => {$(
            impl sealed::Sealed for $t {}

            impl Integer for $t {
                #[inline]
                fn is_negative(self) -> bool {
                    self < 0
                }

                #[inline]
                fn unsigned_abs_u64(self) -> u64 {
                    // widening, never truncates: isize is at most 64 bits
                    self.unsigned_abs() as u64
                }
            }
        )*};
    }

    macro_rules! impl_unsigned {
        ($($t:ty),*) => {$(
            impl sealed::Sealed for $t {}

            impl Integer for $t {
                #[inline]
                fn is_negative(self) -> bool {
                    false
                }

                #[inline]
                fn unsigned_abs_u64(self) -> u64 {
                    self as u64
                }
            }
        )*};
    }

    impl_signed!(i8, i16, i32, i64, isize);
    impl_unsigned!(u8, u16, u32, u64, usize);

    /// Euclid's algorithm. `gcd(a, 0) == a`, so the result is only 0 when
    /// both inputs are.
    pub fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            let r = a % b;
            a = b;
            b = r;
        }
        a
    }

    /// Full 128-bit product of two words, as `(high, low)`.
    #[inline]
    pub fn mul_wide(a: u64, b: u64) -> (u64, u64) {
        let p = a as u128 * b as u128;
        ((p >> 64) as u64, p as u64)
    }

    /// Compares two `(high, low)` pairs, high word first.
    #[inline]
    pub fn cmp_wide(x: (u64, u64), y: (u64, u64)) -> Ordering {
        x.0.cmp(&y.0).then(x.1.cmp(&y.1))
    }

    /// `10^exp`, or `None` once it no longer fits a `u64` (exp > 19).
    pub fn pow10(exp: usize) -> Option<u64> {
        u32::try_from(exp).ok().and_then(|e| 10u64.checked_pow(e))
    }

}
