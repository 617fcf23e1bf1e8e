//! Quadratic equations `ax² + bx + c = 0`.

use super::{polish, prepare};
use crate::math::exact::{as_exact_integers, checked_product, checked_sum, reduce_by_gcd};
use crate::math::fp::{sort_dedup, ulp};
use crate::types::SolverError;

/// Real roots of `c + b·x + a·x²`, given as `[c, b, a]`.
///
/// For integer coefficients the discriminant `b² - 4ac` is evaluated exactly
/// (after dividing out the common factor) so a double root is recognised
/// without rounding noise. Otherwise the discriminant is treated as zero when
/// it lies within ten ULPs of its larger term. Two distinct roots are computed
/// with the cancellation-free formula and polished.
///
/// A vanishing `a` reduces the problem to the linear equation `bx + c = 0`.
///
/// # Errors
///
/// `SolverError::InvalidArgument` for an empty slice, more than three
/// coefficients, non-finite values or a constant polynomial.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomials::solve_quadratic;
///
/// assert_eq!(solve_quadratic(&[-1.0, 0.0, 1.0]).unwrap(), vec![-1.0, 1.0]);
/// assert_eq!(solve_quadratic(&[1.0, -2.0, 1.0]).unwrap(), vec![1.0]);
/// assert!(solve_quadratic(&[1.0, 0.0, 1.0]).unwrap().is_empty());
/// ```
pub fn solve_quadratic(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let coeffs = prepare(coeffs, Some(2))?;
    quadratic(coeffs)
}

/// Roots of a trimmed polynomial of degree one or two.
pub(crate) fn quadratic(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    debug_assert!(coeffs.len() == 2 || coeffs.len() == 3);
    if coeffs.len() == 2 || coeffs[2] == 0.0 {
        return Ok(linear(coeffs[0], coeffs[1]));
    }
    let (mut c, mut b, mut a) = (coeffs[0], coeffs[1], coeffs[2]);

    let (delta, limit) = match exact_discriminant(c, b, a) {
        Some((delta, reduced)) => {
            [c, b, a] = reduced;
            (delta, 0.0)
        }
        None => {
            let b2 = b * b;
            let ac4 = 4.0 * a * c;
            (b2 - ac4, 10.0 * ulp(b2).max(ulp(ac4)))
        }
    };

    if delta.abs() <= limit {
        // + 0.0 maps -0.0 to 0.0
        return Ok(vec![-b / (2.0 * a) + 0.0]);
    }
    if delta < 0.0 {
        return Ok(Vec::new());
    }

    let root = delta.sqrt();
    let q = if b < 0.0 { (root - b) / 2.0 } else { -(b + root) / 2.0 };
    let mut roots = vec![polish(coeffs, q / a)?, polish(coeffs, c / q)?];
    sort_dedup(&mut roots);
    Ok(roots)
}

fn linear(c: f64, b: f64) -> Vec<f64> {
    if b == 0.0 {
        Vec::new()
    } else {
        vec![-c / b]
    }
}

/// `b² - 4ac` computed exactly, with the gcd-reduced coefficients.
fn exact_discriminant(c: f64, b: f64, a: f64) -> Option<(f64, [f64; 3])> {
    let mut ints = as_exact_integers(&[c, b, a])?;
    reduce_by_gcd(&mut ints);
    let (ic, ib, ia) = (ints[0], ints[1], ints[2]);
    let delta = checked_sum([
        checked_product(&[ib, ib]),
        checked_product(&[-4, ia, ic]),
    ])?;
    Some((delta as f64, [ic as f64, ib as f64, ia as f64]))
}
