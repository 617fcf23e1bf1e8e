//! Floating-point spacing helpers.
//!
//! Error bounds throughout the solvers are expressed in units in the last
//! place (ULP). The helpers here follow the usual IEEE conventions: `ulp(x)`
//! is the distance from `|x|` to the next larger representable magnitude,
//! and `signum` maps both zeros to zero.

/// Unit in the last place of `x`.
///
/// Returns the gap between `|x|` and the next representable value above it;
/// `ulp(0.0)` is the smallest subnormal, `ulp(±∞)` is `+∞` and `ulp(NaN)` is
/// NaN.
///
/// # Example
///
/// ```
/// use roots_core::math::fp::ulp;
///
/// assert_eq!(ulp(1.0), f64::EPSILON);
/// assert_eq!(ulp(-1.0), f64::EPSILON);
/// ```
#[inline]
pub fn ulp(x: f64) -> f64 {
    let x = x.abs();
    if x.is_nan() {
        return f64::NAN;
    }
    if x.is_infinite() {
        return f64::INFINITY;
    }
    if x == f64::MAX {
        // 2^971, the spacing just below the overflow threshold
        return x - f64::MAX.next_down();
    }
    x.next_up() - x
}

/// `x · 2ⁿ`.
#[inline]
pub fn scalb(x: f64, n: i32) -> f64 {
    x * 2.0_f64.powi(n)
}

/// Sign of `x` as `-1.0`, `0.0` or `1.0`; NaN stays NaN.
///
/// Unlike [`f64::signum`], zero (of either sign) maps to zero, so two values
/// have "different signs" only when they are strictly on opposite sides of
/// zero or exactly one of them vanishes.
#[inline]
pub fn signum(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Returns `true` when `signum(a) != signum(b)`.
#[inline]
pub fn sign_differs(a: f64, b: f64) -> bool {
    signum(a) != signum(b)
}

/// Next representable value towards `+∞`.
#[inline]
pub fn next_up(x: f64) -> f64 {
    x.next_up()
}

/// Next representable value towards `-∞`.
#[inline]
pub fn next_down(x: f64) -> f64 {
    x.next_down()
}

/// Sort a vector of finite values in ascending order.
pub(crate) fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

/// Sort ascending and drop exactly equal neighbours; `-0.0` becomes `0.0`.
pub(crate) fn sort_dedup(values: &mut Vec<f64>) {
    for v in values.iter_mut() {
        if *v == 0.0 {
            *v = 0.0;
        }
    }
    sort_ascending(values);
    values.dedup_by(|a, b| *a == *b);
}
