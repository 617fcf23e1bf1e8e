//! Real roots of polynomials.
//!
//! Coefficients are always given in ascending powers: `coeffs[i]` multiplies
//! `xⁱ`. Trailing zero coefficients are ignored, so a cubic whose leading
//! coefficient vanishes is solved as a quadratic.
//!
//! ## Closed forms
//!
//! - [`solve_quadratic`]: Exact discriminant for integer coefficients,
//!   cancellation-free root formula
//! - [`solve_cubic`] / [`solve_depressed_cubic`]: Classification by
//!   `Δ₀ = b² - 3ac`, trigonometric and Cardano branches for `b = 0`
//! - [`solve_quartic`] / [`solve_depressed_quartic`]: [`QuarticCase`]
//!   classification followed by the resolvent cubic
//!
//! ## Recursive solvers
//!
//! - [`solve_polynomial`]: Any degree; isolates roots between the critical
//!   and inflection points obtained by solving the derivative
//! - [`solve_bezier`]: Bernstein-basis polynomials restricted to `[0, 1]`
//!
//! Every root is polished with a compensated (Kahan) evaluation of the
//! polynomial before it is returned, and results are ascending without
//! duplicates.
//!
//! ## Example
//!
//! ```
//! use roots_core::math::polynomials::{solve_cubic, solve_polynomial};
//!
//! // (x - 1)(x - 2)(x - 3)
//! assert_eq!(solve_cubic(&[-6.0, 11.0, -6.0, 1.0]).unwrap(), vec![1.0, 2.0, 3.0]);
//!
//! // x⁵ - x = x(x - 1)(x + 1)(x² + 1)
//! assert_eq!(
//!     solve_polynomial(&[0.0, -1.0, 0.0, 0.0, 0.0, 1.0]).unwrap(),
//!     vec![-1.0, 0.0, 1.0]
//! );
//! ```

mod bezier;
mod cubic;
mod general;
mod quadratic;
mod quartic;

pub use bezier::{solve_bezier, solve_bezier_with_critical_points};
pub use cubic::{solve_cubic, solve_depressed_cubic};
pub use general::{solve_polynomial, solve_polynomial_with_critical_points};
pub use quadratic::solve_quadratic;
pub use quartic::{solve_depressed_quartic, solve_quartic, QuarticCase, QuarticInvariants};

use crate::math::polynomial::{trim_trailing_zeros, Horner, Kahan, Polynomial};
use crate::math::solvers::{refine_solution, refine_twiddle, Bracket, Newton, SolverConfig};
use crate::traits::RealFunction;
use crate::types::SolverError;

/// Validate a coefficient slice and drop its trailing zeros.
///
/// Rejects empty slices, non-finite coefficients, constant (or all-zero)
/// polynomials and, when `max_degree` is given, polynomials of higher
/// degree.
pub(crate) fn prepare(coeffs: &[f64], max_degree: Option<usize>) -> Result<&[f64], SolverError> {
    if coeffs.is_empty() {
        return Err(SolverError::InvalidArgument(
            "coefficient slice is empty".to_string(),
        ));
    }
    if let Some(bad) = coeffs.iter().find(|c| !c.is_finite()) {
        return Err(SolverError::InvalidArgument(format!(
            "coefficients must be finite, got {}",
            bad
        )));
    }
    let trimmed = trim_trailing_zeros(coeffs);
    if trimmed.len() < 2 {
        return Err(SolverError::degenerate());
    }
    if let Some(max) = max_degree {
        if trimmed.len() > max + 1 {
            return Err(SolverError::InvalidArgument(format!(
                "expected a polynomial of degree at most {}, got degree {}",
                max,
                trimmed.len() - 1
            )));
        }
    }
    Ok(trimmed)
}

/// Newton steps with the compensated evaluator, then the ULP twiddle.
pub(crate) fn polish(coeffs: &[f64], x: f64) -> Result<f64, SolverError> {
    refine_solution(&Polynomial::<Kahan>::new(coeffs), 0.0, x)
}

/// ULP twiddle only, for multiple roots where Newton steps stall.
pub(crate) fn polish_multiple(coeffs: &[f64], x: f64) -> Result<f64, SolverError> {
    refine_twiddle(&Polynomial::<Kahan>::new(coeffs), 0.0, x)
}

/// `true` when `|p(x)|` is indistinguishable from zero.
pub(crate) fn is_negligible(coeffs: &[f64], x: f64) -> bool {
    let p = Polynomial::<Horner>::new(coeffs);
    let value = Polynomial::<Kahan>::new(coeffs).value(x);
    value.abs() <= p.error_bound(x).unwrap_or(0.0)
}

/// Locate a simple root with unrefined Newton steps, then polish it.
///
/// With a bracket the iteration starts at its midpoint and falls back on
/// Brent steps whenever an iterate leaves it.
pub(crate) fn locate(coeffs: &[f64], guess: f64, bracket: Option<Bracket>) -> Result<f64, SolverError> {
    let solver = Newton::new(SolverConfig::default().optimized(false));
    let p = Polynomial::<Horner>::new(coeffs);
    let start = bracket.map_or(guess, |b| b.midpoint());
    let x = solver.find_root(&p, start, bracket)?;
    polish(coeffs, x)
}

/// The candidate with the smallest `|p(x)|`.
pub(crate) fn best_candidate(coeffs: &[f64], candidates: &[f64]) -> Option<f64> {
    let p = Polynomial::<Kahan>::new(coeffs);
    candidates
        .iter()
        .copied()
        .min_by(|&a, &b| p.value(a).abs().total_cmp(&p.value(b).abs()))
}

/// Critical points (flag `false`) and inflection points (flag `true`) in
/// ascending order.
///
/// An inflection point within `limit` of a critical point is dropped; the
/// merged point counts as critical.
pub(crate) fn merge_points(cpts: &[f64], ipts: &[f64], limit: f64) -> Vec<(f64, bool)> {
    let mut points: Vec<(f64, bool)> = cpts.iter().map(|&x| (x, false)).collect();
    points.extend(
        ipts.iter()
            .filter(|&&x| !cpts.iter().any(|&c| (c - x).abs() <= limit))
            .map(|&x| (x, true)),
    );
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_trims() {
        let trimmed = prepare(&[1.0, 2.0, 0.0, 0.0], Some(3)).unwrap();
        assert_eq!(trimmed, &[1.0, 2.0]);
    }

    #[test]
    fn test_prepare_rejects_bad_input() {
        assert!(matches!(prepare(&[], None), Err(SolverError::InvalidArgument(_))));
        assert!(matches!(
            prepare(&[0.0, 0.0, 0.0], None),
            Err(SolverError::InvalidArgument(_))
        ));
        assert!(matches!(prepare(&[5.0], None), Err(SolverError::InvalidArgument(_))));
        assert!(matches!(
            prepare(&[1.0, f64::NAN], None),
            Err(SolverError::InvalidArgument(_))
        ));
        assert!(matches!(
            prepare(&[1.0, 1.0, 1.0, 1.0], Some(2)),
            Err(SolverError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_locate_in_bracket() {
        let coeffs = [-2.0, 0.0, 1.0];
        let root = locate(&coeffs, 0.0, Some(Bracket::new(0.0, 2.0))).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() <= 2.0 * f64::EPSILON);
    }

    #[test]
    fn test_merge_points() {
        let points = merge_points(&[1.0, 3.0], &[0.0, 1.0, 2.0], 0.0);
        assert_eq!(
            points,
            vec![(0.0, true), (1.0, false), (2.0, true), (3.0, false)]
        );
    }

    #[test]
    fn test_best_candidate() {
        let coeffs = [-1.0, 0.0, 1.0];
        assert_eq!(best_candidate(&coeffs, &[0.5, 1.0, 3.0]), Some(1.0));
        assert_eq!(best_candidate(&coeffs, &[]), None);
    }
}
