//! Exact integer arithmetic for discriminants.
//!
//! When every coefficient of a polynomial is an integer, the sign of a
//! discriminant can be decided exactly. Products are computed in `i128`
//! with checked operations; any overflow yields `None` and the caller falls
//! back on floating-point evaluation with an error bound.

use num_traits::ToPrimitive;

/// Integer value of `x` when `x` is finite and has no fractional part.
///
/// # Example
///
/// ```
/// use roots_core::math::exact::as_exact_integer;
///
/// assert_eq!(as_exact_integer(-6.0), Some(-6));
/// assert_eq!(as_exact_integer(0.5), None);
/// assert_eq!(as_exact_integer(f64::NAN), None);
/// ```
pub fn as_exact_integer(x: f64) -> Option<i128> {
    if !x.is_finite() || x.fract() != 0.0 {
        return None;
    }
    x.to_i128()
}

/// Integer values of all coefficients, or `None` if any is not integral.
pub fn as_exact_integers(coeffs: &[f64]) -> Option<Vec<i128>> {
    coeffs.iter().map(|&c| as_exact_integer(c)).collect()
}

/// Greatest common divisor (always non-negative; `gcd(0, 0) == 0`).
pub fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.min(i128::MAX as u128) as i128
}

/// GCD of a slice of integers.
pub fn gcd_all(values: &[i128]) -> i128 {
    values.iter().fold(0, |acc, &v| gcd(acc, v))
}

/// Divide every value by the common divisor of the slice.
///
/// Values are left untouched when the divisor is 0 or 1.
pub fn reduce_by_gcd(values: &mut [i128]) {
    let g = gcd_all(values);
    if g > 1 {
        for v in values.iter_mut() {
            *v /= g;
        }
    }
}

/// Checked product of all factors.
#[inline]
pub fn checked_product(factors: &[i128]) -> Option<i128> {
    factors
        .iter()
        .try_fold(1_i128, |acc, &f| acc.checked_mul(f))
}

/// Checked sum of terms that may already have overflowed.
#[inline]
pub fn checked_sum<I: IntoIterator<Item = Option<i128>>>(terms: I) -> Option<i128> {
    terms
        .into_iter()
        .try_fold(0_i128, |acc, t| acc.checked_add(t?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_integer() {
        assert_eq!(as_exact_integer(3.0), Some(3));
        assert_eq!(as_exact_integer(-0.0), Some(0));
        assert_eq!(as_exact_integer(1e30), Some(1_000_000_000_000_000_019_884_624_838_656));
        assert_eq!(as_exact_integer(1e40), None);
        assert_eq!(as_exact_integer(f64::INFINITY), None);
    }

    #[test]
    fn test_exact_integers_slice() {
        assert_eq!(as_exact_integers(&[1.0, -2.0]), Some(vec![1, -2]));
        assert_eq!(as_exact_integers(&[1.0, 2.5]), None);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd_all(&[4, 8, -12]), 4);
    }

    #[test]
    fn test_reduce_by_gcd() {
        let mut v = [4, -8, 12];
        reduce_by_gcd(&mut v);
        assert_eq!(v, [1, -2, 3]);

        let mut zeros = [0, 0];
        reduce_by_gcd(&mut zeros);
        assert_eq!(zeros, [0, 0]);
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(checked_product(&[2, 3, -4]), Some(-24));
        assert_eq!(checked_product(&[i128::MAX, 2]), None);
        assert_eq!(checked_sum([Some(1), Some(2)]), Some(3));
        assert_eq!(checked_sum([Some(1), None]), None);
        assert_eq!(checked_sum([Some(i128::MAX), Some(1)]), None);
    }
}
