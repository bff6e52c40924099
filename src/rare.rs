use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::arith::is_perfect_square;

pub fn reverse_number(n: &BigUint) -> BigUint {
    let s = n.to_string();
    let reversed = s.chars().rev().collect::<String>();
    reversed.parse().unwrap()
}

/// Digital root of n: repeated digit-sum reduction to a single digit.
///
/// Equivalent to n % 9, except that a nonzero multiple of 9 reduces to 9
/// rather than 0.
pub fn digital_root(n: &BigUint) -> u32 {
    if n.is_zero() {
        return 0;
    }
    let m = (n % 9u32).to_u32().unwrap();
    if m == 0 {
        9
    } else {
        m
    }
}

/// Return true if n is a rare number: n + reverse(n) and n - reverse(n) are
/// both perfect squares, with reverse(n) < n as the canonical orientation.
///
/// When `rev` is supplied the ordering check is assumed already done by the
/// caller; passing a reverse that is not smaller than n is a contract
/// violation (the difference would underflow).
pub fn is_rare(n: &BigUint, rev: Option<&BigUint>) -> bool {
    let computed;
    let rev = match rev {
        Some(r) => r,
        None => {
            computed = reverse_number(n);
            if computed >= *n {
                return false;
            }
            &computed
        }
    };
    is_perfect_square(&(n + rev)) && is_perfect_square(&(n - rev))
}
