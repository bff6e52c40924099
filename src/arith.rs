use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

/// Values at or below this fit the 53-bit mantissa of an f64, so a
/// floating-point square root plus floor correction is exact.
const FLOAT_ISQRT_MAX: u64 = 1 << 52;

fn isqrt_u64(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}

/// Return the largest integer r such that r * r <= n.
///
/// Small values take the corrected floating-point path; anything wider uses
/// integer Newton iteration seeded at `1 << ceil(bits / 2)`, which stays
/// exact at any magnitude.
pub fn big_isqrt(n: &BigUint) -> BigUint {
    if let Some(small) = n.to_u64() {
        if small <= FLOAT_ISQRT_MAX {
            return BigUint::from(isqrt_u64(small));
        }
    }

    let mut x = BigUint::one() << (((n.bits() + 1) >> 1) as usize);
    loop {
        let y = (&x + n / &x) >> 1u32;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Return true if n is a perfect square.
pub fn is_perfect_square(n: &BigUint) -> bool {
    let r = big_isqrt(n);
    &r * &r == *n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    #[test]
    fn test_isqrt_small() {
        assert_eq!(big_isqrt(&BigUint::from(0u32)), BigUint::from(0u32));
        assert_eq!(big_isqrt(&BigUint::from(1u32)), BigUint::from(1u32));
        assert_eq!(big_isqrt(&BigUint::from(10u32)), BigUint::from(3u32));
        assert_eq!(big_isqrt(&BigUint::from(16u32)), BigUint::from(4u32));
        assert_eq!(
            big_isqrt(&BigUint::from(99999980000001u64)),
            BigUint::from(9999999u64)
        );
    }

    #[test]
    fn test_isqrt_newton_path() {
        // 39-digit values, far past the floating-point fast path.
        assert_eq!(
            big_isqrt(&big("152415787532388367501905199875019052100")),
            big("12345678901234567890")
        );
        assert_eq!(
            big_isqrt(&big("152415787532388367501905199875019052101")),
            big("12345678901234567890")
        );
        assert_eq!(
            big_isqrt(&big("152415787532388367526596557677488187880")),
            big("12345678901234567890")
        );
        assert_eq!(
            big_isqrt(&big("152415787532388367526596557677488187881")),
            big("12345678901234567891")
        );
    }

    #[test]
    fn test_isqrt_floor_property() {
        for n in (0u64..5000).chain([u32::MAX as u64, FLOAT_ISQRT_MAX - 1]) {
            let n = BigUint::from(n);
            let r = big_isqrt(&n);
            assert!(&r * &r <= n, "floor violated for {}", n);
            let r1 = &r + 1u32;
            assert!(&r1 * &r1 > n, "not the largest root for {}", n);
        }
    }

    #[test]
    fn test_is_perfect_square() {
        assert!(is_perfect_square(&BigUint::from(1u32)));
        assert!(!is_perfect_square(&BigUint::from(2u32)));
        assert!(is_perfect_square(&BigUint::from(4u32)));
        assert!(is_perfect_square(&BigUint::from(1002001u32)));
        assert!(!is_perfect_square(&BigUint::from(1002002u32)));
        assert!(is_perfect_square(&big(
            "152415787532388367526596557677488187881"
        )));
        assert!(!is_perfect_square(&big(
            "152415787532388367526596557677488187882"
        )));
    }
}
