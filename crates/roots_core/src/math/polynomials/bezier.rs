//! Bernstein-basis polynomials on `[0, 1]`.
//!
//! The weights are kept in the Bernstein basis throughout: evaluation uses de
//! Casteljau's algorithm and the derivative is again a Bernstein polynomial,
//! so the recursion over critical and inflection points never leaves the
//! numerically stable basis. Only roots inside `[0, 1]` are reported.

use super::general;
use super::merge_points;
use super::quadratic::quadratic;
use crate::math::bernstein::{derivative, derivative_weights, error_bound, sum, to_monomial};
use crate::math::fp::{scalb, sign_differs, sort_dedup, ulp};
use crate::math::polynomial::trim_trailing_zeros;
use crate::math::solvers::{refine_solution, refine_twiddle, Bracket, Newton, SolverConfig};
use crate::traits::{Differentiable, Func};
use crate::types::{PolynomialRoots, SolverError};

/// Critical and inflection points closer than this to each other or to an
/// end of the interval are merged.
const BEZIER_X_LIMIT: f64 = f64::EPSILON * 32.0;

/// Roots in `[0, 1]` of the Bernstein polynomial with weights `beta`.
///
/// # Errors
///
/// `SolverError::InvalidArgument` for an empty slice, non-finite weights or
/// a constant polynomial.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomials::solve_bezier;
///
/// assert_eq!(solve_bezier(&[-0.5, 0.5]).unwrap(), vec![0.5]);
/// // 2t(1 - t) + t² = 2t - t² has its other root at t = 2
/// assert_eq!(solve_bezier(&[0.0, 1.0, 1.0]).unwrap(), vec![0.0]);
/// ```
pub fn solve_bezier(beta: &[f64]) -> Result<Vec<f64>, SolverError> {
    validate(beta)?;
    Ok(solve_bernstein(beta, false)?.roots)
}

/// Roots in `[0, 1]` together with the critical points in `[0, 1]`.
///
/// # Errors
///
/// Same as [`solve_bezier`].
pub fn solve_bezier_with_critical_points(beta: &[f64]) -> Result<PolynomialRoots, SolverError> {
    validate(beta)?;
    solve_bernstein(beta, true)
}

fn validate(beta: &[f64]) -> Result<(), SolverError> {
    if beta.is_empty() {
        return Err(SolverError::InvalidArgument(
            "weight slice is empty".to_string(),
        ));
    }
    if let Some(bad) = beta.iter().find(|b| !b.is_finite()) {
        return Err(SolverError::InvalidArgument(format!(
            "weights must be finite, got {}",
            bad
        )));
    }
    if trim_trailing_zeros(&to_monomial(beta)).len() < 2 {
        return Err(SolverError::degenerate());
    }
    Ok(())
}

fn solve_bernstein(beta: &[f64], critical: bool) -> Result<PolynomialRoots, SolverError> {
    let monomial = to_monomial(beta);
    let trimmed = trim_trailing_zeros(&monomial);
    if trimmed.len() < 2 {
        return Ok(PolynomialRoots::default());
    }
    if trimmed.len() < beta.len() {
        // Degree-elevated weights: solve the true degree in the monomial basis
        let result = general::solve(trimmed, critical, false)?;
        return Ok(PolynomialRoots::new(
            in_unit_interval(result.roots),
            in_unit_interval(result.critical_points),
        ));
    }

    match beta.len() {
        2 => Ok(PolynomialRoots::new(linear(beta[0], beta[1]), Vec::new())),
        3 => quadratic_bezier(beta, critical),
        _ => recursive(beta),
    }
}

/// `β₀(1 - t) + β₁t`, snapping roots within rounding distance of an end.
fn linear(b0: f64, b1: f64) -> Vec<f64> {
    let error1 = ulp(b0);
    let error2 = error1 + ulp(b1);
    let denom = b1 - b0;
    if denom.abs() < error2 {
        return Vec::new();
    }
    let mut v = -b0 / denom;
    let error = error1 / denom.abs() + v.abs() * error2;
    if v.abs() <= error {
        v = 0.0;
    } else if (v - 1.0).abs() <= error {
        v = 1.0;
    }
    if (0.0..=1.0).contains(&v) {
        vec![v]
    } else {
        Vec::new()
    }
}

fn quadratic_bezier(beta: &[f64], critical: bool) -> Result<PolynomialRoots, SolverError> {
    let (b0, b1, b2) = (beta[0], beta[1], beta[2]);
    let mut coeffs = [b0, 2.0 * (b1 - b0), b0 + b2 - 2.0 * b1];
    if coeffs[2].abs() < ulp(b0) + ulp(b2) + 2.0 * ulp(b1) {
        coeffs[2] = 0.0;
    }
    let trimmed = trim_trailing_zeros(&coeffs);
    let mut roots = if trimmed.len() < 2 {
        Vec::new()
    } else {
        quadratic(trimmed)?
    };

    for end in [0.0, 1.0] {
        if is_root(beta, end) {
            if let Some(nearest) = roots
                .iter_mut()
                .min_by(|a, b| (**a - end).abs().total_cmp(&(**b - end).abs()))
            {
                *nearest = end;
            }
        }
    }

    let mut cpts = Vec::new();
    if critical && coeffs[2] != 0.0 {
        let vertex = -coeffs[1] / (2.0 * coeffs[2]);
        if (0.0..=1.0).contains(&vertex) {
            cpts.push(vertex);
        }
    }
    Ok(PolynomialRoots::new(in_unit_interval(roots), cpts))
}

/// Degree three and above: scan `0`, the critical and inflection points in
/// `(0, 1)` and `1`.
fn recursive(beta: &[f64]) -> Result<PolynomialRoots, SolverError> {
    let inner = solve_bernstein(&derivative_weights(beta), true)?;
    let (cpts, ipts) = (inner.roots, inner.critical_points);
    let f = bernstein_function(beta);

    let mut points = vec![(0.0, true)];
    points.extend(
        merge_points(&cpts, &ipts, BEZIER_X_LIMIT)
            .into_iter()
            .filter(|&(x, _)| x > BEZIER_X_LIMIT && x < 1.0 - BEZIER_X_LIMIT),
    );
    points.push((1.0, true));

    let mut roots = Vec::new();
    let mut x = 0.0;
    let mut value = sum(beta, x);
    let mut at_root = is_root(beta, x);
    if at_root {
        roots.push(x);
    }
    for &(x2, inflection) in &points[1..] {
        let value2 = sum(beta, x2);
        if at_root {
            at_root = false;
        } else if is_root(beta, x2) {
            roots.push(refine_point(&f, x2, inflection)?);
            at_root = true;
        } else if sign_differs(value, value2) {
            roots.push(find_bezier_root(&f, x, x2)?);
        }
        x = x2;
        value = value2;
    }
    Ok(PolynomialRoots::new(in_unit_interval(roots), cpts))
}

fn bernstein_function(beta: &[f64]) -> impl Differentiable + '_ {
    Func::new(move |t| sum(beta, t))
        .with_derivative(move |t| derivative(beta, t))
        .with_error_bound(move |t| error_bound(beta, t))
}

/// `|B(x)|` within a generous multiple of the de Casteljau error bound.
fn is_root(beta: &[f64], x: f64) -> bool {
    sum(beta, x).abs() <= scalb(error_bound(beta, x), 8)
}

fn refine_point<F: Differentiable>(f: &F, x: f64, inflection: bool) -> Result<f64, SolverError> {
    if x == 0.0 || x == 1.0 {
        Ok(x)
    } else if inflection {
        refine_solution(f, 0.0, x)
    } else {
        refine_twiddle(f, 0.0, x)
    }
}

/// Bracketed Newton search on `[x1, x2]`, then refinement.
fn find_bezier_root<F: Differentiable>(f: &F, x1: f64, x2: f64) -> Result<f64, SolverError> {
    let bracket = Bracket::new(x1, x2);
    let solver = Newton::new(SolverConfig::default().optimized(false));
    let x = solver.find_root(f, bracket.midpoint(), Some(bracket))?;
    Ok(refine_solution(f, 0.0, x)?.clamp(0.0, 1.0))
}

fn in_unit_interval(mut values: Vec<f64>) -> Vec<f64> {
    values.retain(|v| (0.0..=1.0).contains(v));
    sort_dedup(&mut values);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::bernstein::binomial;
    use approx::assert_relative_eq;

    /// Bernstein weights of a monomial polynomial of the same degree.
    fn from_monomial(coeffs: &[f64]) -> Vec<f64> {
        let n = coeffs.len() - 1;
        (0..=n)
            .map(|k| {
                (0..=k)
                    .map(|i| binomial(k, i) / binomial(n, i) * coeffs[i])
                    .sum()
            })
            .collect()
    }

    // ========================================
    // Low Degrees
    // ========================================

    #[test]
    fn test_linear() {
        assert_eq!(solve_bezier(&[-0.5, 0.5]).unwrap(), vec![0.5]);
        assert!(solve_bezier(&[1.0, 2.0]).unwrap().is_empty());
        assert_eq!(solve_bezier(&[0.0, 2.0]).unwrap(), vec![0.0]);
        assert_eq!(solve_bezier(&[-2.0, 0.0]).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_quadratic_double_root() {
        // (1 - 2t)²
        assert_eq!(solve_bezier(&[1.0, -1.0, 1.0]).unwrap(), vec![0.5]);
    }

    #[test]
    fn test_quadratic_vertex() {
        let result = solve_bezier_with_critical_points(&[1.0, -1.0, 1.0]).unwrap();
        assert_eq!(result.critical_points, vec![0.5]);
    }

    #[test]
    fn test_degree_elevated_weights() {
        // 2t - 1 written with three weights
        assert_eq!(solve_bezier(&[-1.0, 0.0, 1.0]).unwrap(), vec![0.5]);
        // 3t written with four weights
        assert_eq!(solve_bezier(&[0.0, 1.0, 2.0, 3.0]).unwrap(), vec![0.0]);
    }

    // ========================================
    // Recursive Scan
    // ========================================

    #[test]
    fn test_cubic_three_roots() {
        // (t - 0.25)(t - 0.5)(t - 0.75)
        let beta = from_monomial(&[-0.09375, 0.6875, -1.5, 1.0]);
        let result = solve_bezier_with_critical_points(&beta).unwrap();
        assert_eq!(result.len(), 3);
        assert_relative_eq!(result.roots[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(result.roots[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(result.roots[2], 0.75, epsilon = 1e-12);
        assert_eq!(result.critical_point_count(), 2);
    }

    #[test]
    fn test_roots_outside_interval_dropped() {
        // (t + 1)(t - 0.5)(t - 3) has one root in [0, 1]
        let beta = from_monomial(&[1.5, -2.0, -2.5, 1.0]);
        let roots = solve_bezier(&beta).unwrap();
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_root_at_endpoint() {
        // t(t - 0.5)(t - 2)
        let beta = from_monomial(&[0.0, 1.0, -2.5, 1.0]);
        let roots = solve_bezier(&beta).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0], 0.0);
        assert_relative_eq!(roots[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_quartic_two_roots() {
        // (t - 0.2)(t - 0.6)(t² + 1)
        let beta = from_monomial(&[0.12, -0.8, 1.12, -0.8, 1.0]);
        let roots = solve_bezier(&beta).unwrap();
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(roots[1], 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_input() {
        assert!(solve_bezier(&[]).is_err());
        assert!(solve_bezier(&[1.0]).is_err());
        assert!(solve_bezier(&[2.0, 2.0, 2.0]).is_err());
        assert!(solve_bezier(&[0.0, f64::NAN]).is_err());
    }
}
