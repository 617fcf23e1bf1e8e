//! Cubic equations `ax³ + bx² + cx + d = 0`.

use std::f64::consts::PI;

use tracing::debug;

use super::quadratic::quadratic;
use super::{best_candidate, is_negligible, locate, polish, polish_multiple, prepare};
use crate::math::exact::{as_exact_integers, checked_product, checked_sum, reduce_by_gcd};
use crate::math::fp::{scalb, sign_differs, signum, sort_dedup, ulp};
use crate::math::polynomial::{trim_trailing_zeros, Kahan, Polynomial};
use crate::math::solvers::Bracket;
use crate::traits::{RealFunction, TwiceDifferentiable};
use crate::types::{Method, SolverError};

/// Geometric steps taken away from a critical point before giving up.
const OUTWARD_LIMIT: usize = 2048;

/// Above this `|cos 3θ|` the trigonometric branch checks for a double root.
const NEAR_DOUBLE_RATIO: f64 = 0.999_999_999;

/// Real roots of `d + c·x + b·x² + a·x³`, given as `[d, c, b, a]`.
///
/// The number of real roots follows from `Δ₀ = b² - 3ac` (exact for integer
/// coefficients):
///
/// - `Δ₀ < 0`: the cubic is monotonic; Newton from the inflection point
/// - `Δ₀ = 0`: one root from the closed cube-root formula
/// - `Δ₀ > 0`: the critical values decide between a double root, three
///   simple roots or one root outside the critical interval
///
/// Cubics without an `x²` term are handed to the trigonometric and Cardano
/// formulas of [`solve_depressed_cubic`] when those are well conditioned.
///
/// # Errors
///
/// `SolverError::InvalidArgument` for malformed input (see
/// [`solve_quadratic`](super::solve_quadratic)); a convergence error only if
/// the Newton search for a root fails.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomials::solve_cubic;
///
/// let roots = solve_cubic(&[-6.0, 11.0, -6.0, 1.0]).unwrap();
/// assert_eq!(roots, vec![1.0, 2.0, 3.0]);
/// ```
pub fn solve_cubic(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let coeffs = prepare(coeffs, Some(3))?;
    cubic(coeffs)
}

/// Real roots of `d + c·x + a·x³`, given as `[d, c, 0, a]`.
///
/// Uses Cardano's formula when there is one real root and the
/// trigonometric form when there are three. Near the boundary between the
/// two, the critical points `±√(-c/3a)` are tested for a double root so that
/// `acos` is never trusted close to ±1.
///
/// # Errors
///
/// `SolverError::InvalidArgument` if the `x²` coefficient is not zero, or
/// for malformed input.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomials::solve_depressed_cubic;
///
/// // x³ - 3x + 2 = (x - 1)²(x + 2)
/// assert_eq!(solve_depressed_cubic(&[2.0, -3.0, 0.0, 1.0]).unwrap(), vec![-2.0, 1.0]);
/// ```
pub fn solve_depressed_cubic(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let coeffs = prepare(coeffs, Some(3))?;
    if coeffs.len() < 4 {
        return quadratic(coeffs);
    }
    if coeffs[2] != 0.0 {
        return Err(SolverError::InvalidArgument(format!(
            "depressed cubic requires a zero x² coefficient, got {}",
            coeffs[2]
        )));
    }
    depressed(coeffs)
}

/// Roots of a cubic whose leading coefficient may vanish.
pub(crate) fn cubic(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let coeffs = trim_trailing_zeros(coeffs);
    if coeffs.len() < 4 {
        return quadratic(coeffs);
    }
    let (d, c, b, a) = (coeffs[0], coeffs[1], coeffs[2], coeffs[3]);

    if d == 0.0 {
        let mut roots = quadratic(trim_trailing_zeros(&coeffs[1..]))?;
        roots.push(0.0);
        sort_dedup(&mut roots);
        return Ok(roots);
    }
    if b == 0.0 {
        let p = c / a;
        let q = d / a;
        if p >= 0.0 || 27.0 * q * q / (4.0 * (p * p * p).abs()) > 0.9 {
            return depressed(coeffs);
        }
    }

    // Δ₀ and the coefficients it was computed from (gcd-reduced when exact)
    let (delta0, [_, rc, rb, ra]) = match exact_delta0(coeffs) {
        Some(result) => result,
        None => {
            let t1 = b * b;
            let t2 = 3.0 * a * c;
            let err = 2.0 * ulp(b) * b.abs()
                + ulp(3.0) * (a * c).abs()
                + 3.0 * c.abs() * ulp(a)
                + 3.0 * ulp(c) * a.abs();
            let delta0 = t1 - t2;
            let delta0 = if delta0.abs() <= err { 0.0 } else { delta0 };
            (delta0, [d, c, b, a])
        }
    };
    let inflection = -b / (3.0 * a);

    if delta0 == 0.0 {
        let root = (-b - (27.0 * a * a * d - b * b * b).cbrt()) / (3.0 * a);
        return Ok(vec![polish(coeffs, root)?]);
    }
    if delta0 < 0.0 {
        return Ok(vec![locate(coeffs, inflection, None)?]);
    }

    // Critical points: roots of 3a·x² + 2b·x + c
    let s = delta0.sqrt();
    let t = if rb < 0.0 { s - rb } else { -(rb + s) };
    let (mut cpt1, mut cpt2) = (t / (3.0 * ra), rc / t);
    if cpt2 < cpt1 {
        std::mem::swap(&mut cpt1, &mut cpt2);
    }

    let p = Polynomial::<Kahan>::new(coeffs);
    let (f1, f2) = (p.value(cpt1), p.value(cpt2));
    let double = match (is_negligible(coeffs, cpt1), is_negligible(coeffs, cpt2)) {
        (true, true) => {
            let root = best_candidate(coeffs, &[cpt1, cpt2, inflection]).unwrap_or(inflection);
            return Ok(vec![polish_multiple(coeffs, root)?]);
        }
        (true, false) => Some(cpt1),
        (false, true) => Some(cpt2),
        (false, false) => None,
    };
    if let Some(r) = double {
        let r = polish_multiple(coeffs, r)?;
        let companion = polish(coeffs, -(2.0 * a * r + b) / a)?;
        let mut roots = vec![r, companion];
        sort_dedup(&mut roots);
        return Ok(roots);
    }

    if sign_differs(f1, f2) {
        let mut roots = vec![
            outward(coeffs, cpt1, f1, false)?,
            locate(coeffs, inflection, Some(Bracket::new(cpt1, cpt2)))?,
            outward(coeffs, cpt2, f2, true)?,
        ];
        sort_dedup(&mut roots);
        Ok(roots)
    } else if signum(f1) != signum(p.second_derivative(cpt1)) {
        Ok(vec![outward(coeffs, cpt1, f1, false)?])
    } else {
        Ok(vec![outward(coeffs, cpt2, f2, true)?])
    }
}

/// Root beyond the critical point `x` (value `fx`), searching upwards or
/// downwards.
///
/// The first step is the distance at which the local quadratic Taylor term
/// cancels `fx`; it grows by half each time until the sign changes.
fn outward(coeffs: &[f64], x: f64, fx: f64, up: bool) -> Result<f64, SolverError> {
    let p = Polynomial::<Kahan>::new(coeffs);
    let mut diff = (-2.0 * fx / p.second_derivative(x)).sqrt();
    if !diff.is_finite() || diff <= 0.0 {
        diff = x.abs().max(1.0);
    }
    let step = |diff: f64| if up { x + diff } else { x - diff };

    let mut end = step(diff);
    let mut count = 0;
    loop {
        if count > OUTWARD_LIMIT || !end.is_finite() {
            return Err(SolverError::NotConverging {
                method: Method::Brent,
                x: end,
            });
        }
        let value = p.value(end);
        if value == 0.0 {
            return polish(coeffs, end);
        }
        if sign_differs(value, fx) {
            break;
        }
        count += 1;
        diff *= 1.5;
        end = step(diff);
    }
    locate(coeffs, end, Some(Bracket::new(x, end)))
}

/// Depressed cubic `[d, c, 0, a]` with `a ≠ 0`.
fn depressed(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let (d, c, a) = (coeffs[0], coeffs[1], coeffs[3]);
    let p = c / a;
    let q = d / a;

    if d == 0.0 {
        // x·(x² + p)
        let mut roots = vec![0.0];
        if p < 0.0 {
            let r = (-p).sqrt();
            roots.push(polish(coeffs, r)?);
            roots.push(polish(coeffs, -r)?);
        }
        sort_dedup(&mut roots);
        return Ok(roots);
    }
    if c == 0.0 {
        return Ok(vec![polish(coeffs, (-q).cbrt())?]);
    }

    let (disc, limit) = match exact_depressed_discriminant(d, c, a) {
        Some(disc) => (disc, 0.0),
        None => {
            let t1 = 4.0 * a * c * c * c;
            let t2 = 27.0 * a * a * d * d;
            (-(t1 + t2), scalb(ulp(t1) + ulp(t2), 5))
        }
    };

    if disc.abs() <= limit {
        return double_root_pair(coeffs, -1.5 * d / c);
    }
    if disc < 0.0 {
        let s = q * q / 4.0 + p * p * p / 27.0;
        if s <= 0.0 {
            debug!(disc, s, "depressed cubic discriminant disagrees with Cardano term");
            return double_root_pair(coeffs, -1.5 * d / c);
        }
        let sq = s.sqrt();
        let t = if q > 0.0 { -q / 2.0 - sq } else { -q / 2.0 + sq };
        let u = t.cbrt();
        let root = u - p / (3.0 * u);
        return Ok(vec![polish(coeffs, root)?]);
    }

    // Three real roots: x = 2m·cos((φ - 2πk)/3) with m = √(-p/3)
    let m = (-p / 3.0).sqrt();
    let ratio = ((-q / 2.0) / (m * m * m)).clamp(-1.0, 1.0);
    if ratio.abs() > NEAR_DOUBLE_RATIO {
        for t in [m, -m] {
            if is_negligible(coeffs, t) {
                return double_root_pair(coeffs, t);
            }
        }
    }
    let phi = ratio.acos();
    let mut roots = Vec::with_capacity(3);
    for k in 0..3 {
        let x = 2.0 * m * ((phi - 2.0 * PI * k as f64) / 3.0).cos();
        roots.push(polish(coeffs, x)?);
    }
    sort_dedup(&mut roots);
    Ok(roots)
}

/// Double root `r` of a depressed cubic plus its companion `-2r`.
fn double_root_pair(coeffs: &[f64], r: f64) -> Result<Vec<f64>, SolverError> {
    let mut roots = vec![polish_multiple(coeffs, r)?, polish(coeffs, -2.0 * r)?];
    sort_dedup(&mut roots);
    Ok(roots)
}

/// Exact `Δ₀ = b² - 3ac` with the gcd-reduced coefficients `[d, c, b, a]`.
fn exact_delta0(coeffs: &[f64]) -> Option<(f64, [f64; 4])> {
    let mut ints = as_exact_integers(coeffs)?;
    reduce_by_gcd(&mut ints);
    let (c, b, a) = (ints[1], ints[2], ints[3]);
    let delta0 = checked_sum([checked_product(&[b, b]), checked_product(&[-3, a, c])])?;
    Some((
        delta0 as f64,
        [ints[0] as f64, c as f64, b as f64, a as f64],
    ))
}

/// Exact `-(4ac³ + 27a²d²)` for integer coefficients.
fn exact_depressed_discriminant(d: f64, c: f64, a: f64) -> Option<f64> {
    let mut ints = as_exact_integers(&[d, c, a])?;
    reduce_by_gcd(&mut ints);
    let (d, c, a) = (ints[0], ints[1], ints[2]);
    let disc = checked_sum([
        checked_product(&[-4, a, c, c, c]),
        checked_product(&[-27, a, a, d, d]),
    ])?;
    Some(disc as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn residual(coeffs: &[f64], x: f64) -> f64 {
        Polynomial::<Kahan>::new(coeffs).value(x)
    }

    // ========================================
    // Classification
    // ========================================

    #[test]
    fn test_three_simple_roots() {
        assert_eq!(solve_cubic(&[-6.0, 11.0, -6.0, 1.0]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_monotonic_cubic() {
        // (x - 1)(x² + 2x + 3): Δ₀ < 0
        let roots = solve_cubic(&[-3.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_triple_root() {
        // (x - 2)³: Δ₀ = 0
        assert_eq!(solve_cubic(&[-8.0, 12.0, -6.0, 1.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_double_root() {
        // (x - 1)²(x - 3)
        assert_eq!(solve_cubic(&[-3.0, 7.0, -5.0, 1.0]).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_single_root_outside_critical_interval() {
        // (x + 3)(x² - 2x + 2)
        let roots = solve_cubic(&[6.0, -4.0, 1.0, 1.0]).unwrap();
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], -3.0, epsilon = 1e-14);
    }

    #[test]
    fn test_zero_constant_term() {
        // x(x - 1)(x + 1)
        assert_eq!(solve_cubic(&[0.0, -1.0, 0.0, 1.0]).unwrap(), vec![-1.0, 0.0, 1.0]);
        // x²(x - 2)
        assert_eq!(solve_cubic(&[0.0, 0.0, -2.0, 1.0]).unwrap(), vec![0.0, 2.0]);
    }

    #[test]
    fn test_leading_zero_is_quadratic() {
        assert_eq!(solve_cubic(&[-1.0, 0.0, 1.0, 0.0]).unwrap(), vec![-1.0, 1.0]);
    }

    #[test]
    fn test_negative_leading_coefficient() {
        // -(x - 1)(x - 2)(x - 3)
        assert_eq!(solve_cubic(&[6.0, -11.0, 6.0, -1.0]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    // ========================================
    // Depressed Cubic
    // ========================================

    #[test]
    fn test_outward_search_without_sign_change() {
        // x² + x + 1 stays positive to the right of its minimum
        match outward(&[1.0, 1.0, 1.0], -0.5, 0.75, true).unwrap_err() {
            SolverError::NotConverging { method, .. } => assert_eq!(method, Method::Brent),
            other => panic!("Expected NotConverging, got {:?}", other),
        }
    }

    #[test]
    fn test_depressed_cardano() {
        // x³ + x - 2 = (x - 1)(x² + x + 2)
        let roots = solve_depressed_cubic(&[-2.0, 1.0, 0.0, 1.0]).unwrap();
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_depressed_trigonometric() {
        // x³ - 7x + 6 = (x - 1)(x - 2)(x + 3)
        let roots = solve_depressed_cubic(&[6.0, -7.0, 0.0, 1.0]).unwrap();
        assert_eq!(roots.len(), 3);
        for (root, expected) in roots.iter().zip([-3.0, 1.0, 2.0]) {
            assert_relative_eq!(*root, expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_depressed_double_root() {
        assert_eq!(solve_depressed_cubic(&[2.0, -3.0, 0.0, 1.0]).unwrap(), vec![-2.0, 1.0]);
        assert_eq!(solve_depressed_cubic(&[-2.0, -3.0, 0.0, 1.0]).unwrap(), vec![-1.0, 2.0]);
    }

    #[test]
    fn test_depressed_pure_cube() {
        let roots = solve_depressed_cubic(&[-27.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(roots, vec![3.0]);
    }

    #[test]
    fn test_depressed_without_constant() {
        // x³ - 4x = x(x - 2)(x + 2)
        assert_eq!(
            solve_depressed_cubic(&[0.0, -4.0, 0.0, 1.0]).unwrap(),
            vec![-2.0, 0.0, 2.0]
        );
        // x³ + 4x has only the root 0
        assert_eq!(solve_depressed_cubic(&[0.0, 4.0, 0.0, 1.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_depressed_rejects_quadratic_term() {
        match solve_depressed_cubic(&[1.0, 1.0, 1.0, 1.0]).unwrap_err() {
            SolverError::InvalidArgument(msg) => assert!(msg.contains("x²")),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_non_integer_coefficients() {
        // (x - 0.5)(x - 1.5)(x + 0.25)
        let coeffs = [0.1875, 0.25, -1.75, 1.0];
        let roots = solve_cubic(&coeffs).unwrap();
        assert_eq!(roots.len(), 3);
        for (root, expected) in roots.iter().zip([-0.25, 0.5, 1.5]) {
            assert_relative_eq!(*root, expected, epsilon = 1e-14);
        }
    }

    // ========================================
    // Property Tests
    // ========================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_three_separated_roots(
            r1 in -10.0..10.0_f64,
            gap1 in 0.5..5.0_f64,
            gap2 in 0.5..5.0_f64,
            scale in prop_oneof![0.5..4.0_f64, -4.0..-0.5_f64],
        ) {
            let (r2, r3) = (r1 + gap1, r1 + gap1 + gap2);
            let coeffs = [
                -scale * r1 * r2 * r3,
                scale * (r1 * r2 + r1 * r3 + r2 * r3),
                -scale * (r1 + r2 + r3),
                scale,
            ];
            let roots = solve_cubic(&coeffs).unwrap();
            prop_assert_eq!(roots.len(), 3);
            let p = Polynomial::<crate::math::polynomial::Horner>::new(&coeffs);
            for (i, &root) in roots.iter().enumerate() {
                let bound = p.error_bound(root).unwrap();
                prop_assert!(
                    residual(&coeffs, root).abs() <= 4.0 * bound,
                    "root {} = {} residual {} bound {}", i, root, residual(&coeffs, root), bound
                );
            }
            prop_assert!(roots.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn test_single_root_residual(
            r in -10.0..10.0_f64,
            re in -5.0..5.0_f64,
            im in 0.5..5.0_f64,
        ) {
            // (x - r)(x² - 2·re·x + re² + im²)
            let s = re * re + im * im;
            let coeffs = [-r * s, s + 2.0 * re * r, -(2.0 * re + r), 1.0];
            let roots = solve_cubic(&coeffs).unwrap();
            prop_assert!(!roots.is_empty());
            let p = Polynomial::<crate::math::polynomial::Horner>::new(&coeffs);
            for &root in &roots {
                prop_assert!(residual(&coeffs, root).abs() <= 4.0 * p.error_bound(root).unwrap());
            }
        }
    }
}
