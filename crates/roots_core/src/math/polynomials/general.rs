//! Polynomials of arbitrary degree.
//!
//! Degrees up to four use the closed forms. Higher degrees are reduced
//! recursively: the roots of the derivative (critical points) and of the
//! second derivative (inflection points) split the real line into intervals
//! on which the polynomial is monotonic and of fixed curvature, so each
//! interval holds at most one simple root and a sign change brackets it.

use super::cubic::cubic;
use super::quadratic::quadratic;
use super::quartic::quartic;
use super::{is_negligible, locate, merge_points, polish, polish_multiple, prepare};
use crate::math::bernstein::binomial;
use crate::math::fp::{scalb, sign_differs, signum, sort_dedup, ulp};
use crate::math::kahan::KahanSum;
use crate::math::polynomial::{derivative_coefficients, trim_trailing_zeros, Kahan, Polynomial};
use crate::math::solvers::Bracket;
use crate::traits::RealFunction;
use crate::types::{Method, PolynomialRoots, SolverError};

/// Geometric steps taken along an unbounded ray before giving up.
const RAY_LIMIT: usize = 2048;

/// Binary exponent of the ULP multiple within which an inflection point is
/// merged into a critical point.
const MERGE_ULPS: i32 = 4;

/// Real roots of a polynomial of any degree (ascending coefficients).
///
/// # Errors
///
/// `SolverError::InvalidArgument` for an empty slice, non-finite
/// coefficients or a constant polynomial. Convergence errors are only
/// reported when a bracketed root search fails.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomials::solve_polynomial;
///
/// // x⁶ - 14x⁴ + 49x² - 36 = (x² - 1)(x² - 4)(x² - 9)
/// let roots = solve_polynomial(&[-36.0, 0.0, 49.0, 0.0, -14.0, 0.0, 1.0]).unwrap();
/// assert_eq!(roots, vec![-3.0, -2.0, -1.0, 1.0, 2.0, 3.0]);
/// ```
pub fn solve_polynomial(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let coeffs = prepare(coeffs, None)?;
    Ok(solve(coeffs, false, false)?.roots)
}

/// Real roots together with the real zeros of the derivative.
///
/// # Errors
///
/// Same as [`solve_polynomial`].
///
/// # Example
///
/// ```
/// use roots_core::math::polynomials::solve_polynomial_with_critical_points;
///
/// // x³ - 3x: roots 0 and ±√3, critical points ±1
/// let result = solve_polynomial_with_critical_points(&[0.0, -3.0, 0.0, 1.0]).unwrap();
/// assert_eq!(result.roots.len(), 3);
/// assert_eq!(result.critical_points, vec![-1.0, 1.0]);
/// ```
pub fn solve_polynomial_with_critical_points(coeffs: &[f64]) -> Result<PolynomialRoots, SolverError> {
    let coeffs = prepare(coeffs, None)?;
    solve(coeffs, true, false)
}

/// Numerical solution bypassing the quartic closed form.
pub(crate) fn solve_numerically(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    Ok(solve(trim_trailing_zeros(coeffs), false, true)?.roots)
}

/// Roots of a trimmed polynomial of degree ≥ 1.
///
/// Critical points are only guaranteed when `critical` is set.
pub(crate) fn solve(
    coeffs: &[f64],
    critical: bool,
    skip_closed_form: bool,
) -> Result<PolynomialRoots, SolverError> {
    let n = coeffs.len() - 1;
    match n {
        1 => return Ok(PolynomialRoots::new(vec![-coeffs[0] / coeffs[1]], Vec::new())),
        2 => {
            let mut cpts = Vec::new();
            if critical {
                cpts.push(-coeffs[1] / (2.0 * coeffs[2]));
                sort_dedup(&mut cpts);
            }
            return Ok(PolynomialRoots::new(quadratic(coeffs)?, cpts));
        }
        3 => {
            let cpts = if critical {
                quadratic(&derivative_coefficients(coeffs))?
            } else {
                Vec::new()
            };
            return Ok(PolynomialRoots::new(cubic(coeffs)?, cpts));
        }
        4 if !skip_closed_form => {
            let cpts = if critical {
                cubic(&derivative_coefficients(coeffs))?
            } else {
                Vec::new()
            };
            return Ok(PolynomialRoots::new(quartic(coeffs)?, cpts));
        }
        _ => {}
    }

    if coeffs[0] == 0.0 {
        return factor_zero(coeffs, critical);
    }
    if coeffs[1..n].iter().all(|&c| c == 0.0) {
        return binomial_roots(coeffs, critical);
    }
    if n % 2 == 0 && coeffs.iter().skip(1).step_by(2).all(|&c| c == 0.0) {
        return even_roots(coeffs, critical);
    }

    let inner = solve(&derivative_coefficients(coeffs), true, false)?;
    let (cpts, ipts) = (inner.roots, inner.critical_points);
    let roots = if cpts.is_empty() {
        vec![monotonic_root(coeffs, &ipts)?]
    } else {
        scan(coeffs, &cpts, &ipts)?
    };
    Ok(PolynomialRoots::new(roots, cpts))
}

/// `xᵏ·g(x)`: the roots of `g` plus zero.
fn factor_zero(coeffs: &[f64], critical: bool) -> Result<PolynomialRoots, SolverError> {
    let k = coeffs.iter().position(|&c| c != 0.0).unwrap_or(0);
    let reduced = &coeffs[k..];
    let mut roots = if reduced.len() > 1 {
        solve(reduced, false, false)?.roots
    } else {
        Vec::new()
    };
    roots.push(0.0);
    sort_dedup(&mut roots);

    let cpts = if critical {
        solve(&derivative_coefficients(coeffs), false, false)?.roots
    } else {
        Vec::new()
    };
    Ok(PolynomialRoots::new(roots, cpts))
}

/// `a·xⁿ + c` with `c ≠ 0`.
fn binomial_roots(coeffs: &[f64], critical: bool) -> Result<PolynomialRoots, SolverError> {
    let n = coeffs.len() - 1;
    let ratio = -coeffs[0] / coeffs[n];
    let mut roots = Vec::new();
    if n % 2 == 1 {
        roots.push(polish(coeffs, signed_root(ratio, n))?);
    } else if ratio > 0.0 {
        let r = ratio.powf(1.0 / n as f64);
        roots.push(polish(coeffs, -r)?);
        roots.push(polish(coeffs, r)?);
    }
    sort_dedup(&mut roots);
    let cpts = if critical { vec![0.0] } else { Vec::new() };
    Ok(PolynomialRoots::new(roots, cpts))
}

/// Polynomials in `x²` only, solved as `g(z)` with `z = x²`.
fn even_roots(coeffs: &[f64], critical: bool) -> Result<PolynomialRoots, SolverError> {
    let g: Vec<f64> = coeffs.iter().step_by(2).copied().collect();
    let inner = solve(&g, critical, false)?;

    let mut roots = Vec::new();
    for z in inner.roots {
        if z > 0.0 {
            let s = z.sqrt();
            roots.push(polish(coeffs, -s)?);
            roots.push(polish(coeffs, s)?);
        } else if z == 0.0 {
            roots.push(0.0);
        }
    }
    sort_dedup(&mut roots);

    // d/dx g(x²) = 2x·g'(x²)
    let mut cpts = Vec::new();
    if critical {
        cpts.push(0.0);
        for z in inner.critical_points {
            if z > 0.0 {
                cpts.push(-z.sqrt());
                cpts.push(z.sqrt());
            }
        }
        sort_dedup(&mut cpts);
    }
    Ok(PolynomialRoots::new(roots, cpts))
}

/// The single root of a polynomial without critical points (odd degree,
/// strictly monotonic).
fn monotonic_root(coeffs: &[f64], ipts: &[f64]) -> Result<f64, SolverError> {
    let p = Polynomial::<Kahan>::new(coeffs);
    let increasing = coeffs[coeffs.len() - 1] > 0.0;

    let start = if ipts.is_empty() {
        0.0
    } else {
        if let Some(&x) = ipts.iter().find(|&&x| is_negligible(coeffs, x)) {
            return polish(coeffs, x);
        }
        if let Some(w) = ipts
            .windows(2)
            .find(|w| sign_differs(p.value(w[0]), p.value(w[1])))
        {
            return locate(coeffs, 0.0, Some(Bracket::new(w[0], w[1])));
        }
        // Every inflection point is on the same side of the root
        if (p.value(ipts[0]) < 0.0) == increasing {
            ipts[ipts.len() - 1]
        } else {
            ipts[0]
        }
    };
    let value = p.value(start);
    if value == 0.0 {
        return Ok(start);
    }
    let up = (value < 0.0) == increasing;
    let step = taylor_step(coeffs, start, value, up, true);
    let end = expand(coeffs, start, value, up, step)?;
    locate(coeffs, 0.0, Some(Bracket::new(start, end)))
}

/// Scan the merged critical and inflection points from left to right.
///
/// An inflection point a few ULP from a critical point is the same point
/// (a root of multiplicity three or more) and is merged into it.
fn scan(coeffs: &[f64], cpts: &[f64], ipts: &[f64]) -> Result<Vec<f64>, SolverError> {
    let limit = cpts
        .iter()
        .map(|&c| scalb(ulp(c), MERGE_ULPS))
        .fold(0.0, f64::max);
    let points = merge_points(cpts, ipts, limit);
    let p = Polynomial::<Kahan>::new(coeffs);
    let n = coeffs.len() - 1;
    let lead = coeffs[n];
    let mut roots = Vec::new();

    let (mut x, mut inflection) = points[0];
    let mut value = p.value(x);
    let mut at_root = is_negligible(coeffs, x);
    if at_root {
        roots.push(polish_point(coeffs, x, inflection)?);
    } else {
        let at_neg_infinity = if n % 2 == 0 { lead } else { -lead };
        if sign_differs(value, at_neg_infinity) {
            let step = taylor_step(coeffs, x, value, false, inflection);
            let end = expand(coeffs, x, value, false, step)?;
            roots.push(locate(coeffs, 0.0, Some(Bracket::new(end, x)))?);
        }
    }

    for &(x2, inflection2) in &points[1..] {
        let value2 = p.value(x2);
        if at_root {
            // Two neighbouring points cannot both be roots; a negligible value
            // here is the same multiple root and carries no sign
            at_root = is_negligible(coeffs, x2);
        } else if is_negligible(coeffs, x2) {
            roots.push(polish_point(coeffs, x2, inflection2)?);
            at_root = true;
        } else if sign_differs(value, value2) {
            roots.push(locate(coeffs, 0.0, Some(Bracket::new(x, x2)))?);
        }
        x = x2;
        value = value2;
        inflection = inflection2;
    }

    if !at_root && sign_differs(value, lead) {
        let step = taylor_step(coeffs, x, value, true, inflection);
        let end = expand(coeffs, x, value, true, step)?;
        roots.push(locate(coeffs, 0.0, Some(Bracket::new(x, end)))?);
    }
    sort_dedup(&mut roots);
    Ok(roots)
}

/// A critical point that is a root is a multiple root.
fn polish_point(coeffs: &[f64], x: f64, inflection: bool) -> Result<f64, SolverError> {
    if inflection {
        polish(coeffs, x)
    } else {
        polish_multiple(coeffs, x)
    }
}

/// Distance from `x` at which the lowest significant Taylor term cancels
/// `value`, or `None` when that term points the wrong way.
///
/// At a critical point the first-order term vanishes, so the search starts
/// at the second-order term.
fn taylor_step(coeffs: &[f64], x: f64, value: f64, up: bool, inflection: bool) -> Option<f64> {
    let n = coeffs.len() - 1;
    let first = if inflection { 1 } else { 2 };
    for k in first..=n {
        let (s, err) = taylor_coefficient(coeffs, x, k);
        if s.abs() <= err {
            continue;
        }
        let arg = -value / s;
        return if k % 2 == 0 {
            if arg <= 0.0 {
                None
            } else {
                Some(arg.powf(1.0 / k as f64))
            }
        } else {
            let delta = signed_root(arg, k);
            if delta == 0.0 || (delta > 0.0) != up {
                None
            } else {
                Some(delta.abs())
            }
        };
    }
    None
}

/// `Σ_{i≥k} C(i,k)·cᵢ·x^(i-k)` and its rounding error.
fn taylor_coefficient(coeffs: &[f64], x: f64, k: usize) -> (f64, f64) {
    let mut sum = KahanSum::new();
    let mut err = 0.0;
    let mut power = 1.0;
    for (i, &c) in coeffs.iter().enumerate().skip(k) {
        let term = binomial(i, k) * c * power;
        sum.add(term);
        err += ulp(term);
        power *= x;
    }
    (sum.value(), scalb(err, 5))
}

/// Walk away from `x` in geometrically growing steps until the sign of the
/// polynomial differs from `value`.
fn expand(coeffs: &[f64], x: f64, value: f64, up: bool, step: Option<f64>) -> Result<f64, SolverError> {
    let p = Polynomial::<Kahan>::new(coeffs);
    let mut diff = match step {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => x.abs().max(1.0),
    };
    for _ in 0..RAY_LIMIT {
        let end = if up { x + diff } else { x - diff };
        if !end.is_finite() {
            break;
        }
        if sign_differs(p.value(end), value) {
            return Ok(end);
        }
        diff *= 1.5;
    }
    Err(SolverError::NotConverging {
        method: Method::Brent,
        x,
    })
}

/// Real `n`-th root keeping the sign of `v` (odd `n`).
fn signed_root(v: f64, n: usize) -> f64 {
    if n == 3 {
        v.cbrt()
    } else {
        signum(v) * v.abs().powf(1.0 / n as f64)
    }
}
