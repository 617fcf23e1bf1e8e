//! Quartic equations `ax⁴ + bx³ + cx² + dx + e = 0`.
//!
//! The nature of the roots is read off five invariants of the coefficients
//! (see [`QuarticInvariants`]). Cases with repeated roots are solved through
//! the derivatives; the remaining ones go through Ferrari's resolvent cubic.
//! A sign pattern that matches no case, which can only happen when rounding
//! blurs a boundary, is handed to the general recursive solver.

use tracing::debug;

use super::cubic::cubic;
use super::general::solve_numerically;
use super::quadratic::quadratic;
use super::{best_candidate, is_negligible, polish, polish_multiple, prepare};
use crate::math::exact::{as_exact_integers, checked_sum, reduce_by_gcd};
use crate::math::fp::{scalb, sort_ascending, sort_dedup, ulp};
use crate::math::kahan::KahanSum;
use crate::math::polynomial::{derivative_coefficients, trim_trailing_zeros, Kahan, Polynomial};
use crate::traits::RealFunction;
use crate::types::SolverError;

/// A monomial `k·aⁱ·bʲ·cᵏ·dˡ·eᵐ` with exponents in the order `[a, b, c, d, e]`.
type Term = (i32, [u32; 5]);

const DISCRIMINANT: [Term; 16] = [
    (256, [3, 0, 0, 0, 3]),
    (-192, [2, 1, 0, 1, 2]),
    (-128, [2, 0, 2, 0, 2]),
    (144, [2, 0, 1, 2, 1]),
    (-27, [2, 0, 0, 4, 0]),
    (144, [1, 2, 1, 0, 2]),
    (-6, [1, 2, 0, 2, 1]),
    (-80, [1, 1, 2, 1, 1]),
    (18, [1, 1, 1, 3, 0]),
    (16, [1, 0, 4, 0, 1]),
    (-4, [1, 0, 3, 2, 0]),
    (-27, [0, 4, 0, 0, 2]),
    (18, [0, 3, 1, 1, 1]),
    (-4, [0, 3, 0, 3, 0]),
    (-4, [0, 2, 3, 0, 1]),
    (1, [0, 2, 2, 2, 0]),
];

const P_TERMS: [Term; 2] = [(8, [1, 0, 1, 0, 0]), (-3, [0, 2, 0, 0, 0])];

const R_TERMS: [Term; 3] = [
    (1, [0, 3, 0, 0, 0]),
    (8, [2, 0, 0, 1, 0]),
    (-4, [1, 1, 1, 0, 0]),
];

const DELTA0_TERMS: [Term; 3] = [
    (1, [0, 0, 2, 0, 0]),
    (-3, [0, 1, 0, 1, 0]),
    (12, [1, 0, 0, 0, 1]),
];

const D_TERMS: [Term; 5] = [
    (64, [3, 0, 0, 0, 1]),
    (-16, [2, 0, 2, 0, 0]),
    (16, [1, 2, 1, 0, 0]),
    (-16, [2, 1, 0, 1, 0]),
    (-3, [0, 4, 0, 0, 0]),
];

/// Sign-determining invariants of a quartic.
///
/// For `ax⁴ + bx³ + cx² + dx + e`:
///
/// - `delta`: the discriminant Δ
/// - `p = 8ac - 3b²`
/// - `r = b³ + 8a²d - 4abc`
/// - `delta0 = c² - 3bd + 12ae`
/// - `d = 64a³e - 16a²c² + 16ab²c - 16a²bd - 3b⁴`
///
/// Integer coefficients give exact values (computed in `i128` after removing
/// the common factor, which does not change any sign). Otherwise each value is
/// a compensated sum that is set to zero when it lies within its rounding
/// error, so only the signs are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarticInvariants {
    /// Discriminant Δ
    pub delta: f64,
    /// `8ac - 3b²`
    pub p: f64,
    /// `b³ + 8a²d - 4abc`
    pub r: f64,
    /// `c² - 3bd + 12ae`
    pub delta0: f64,
    /// `64a³e - 16a²c² + 16ab²c - 16a²bd - 3b⁴`
    pub d: f64,
}

impl QuarticInvariants {
    /// Invariants of the quartic `[e, d, c, b, a]` (ascending powers).
    ///
    /// # Example
    ///
    /// ```
    /// use roots_core::math::polynomials::{QuarticCase, QuarticInvariants};
    ///
    /// // (x - 1)(x - 2)(x - 3)(x - 4)
    /// let inv = QuarticInvariants::new(&[24.0, -50.0, 35.0, -10.0, 1.0]);
    /// assert!(inv.delta > 0.0);
    /// assert_eq!(QuarticCase::classify(&inv), QuarticCase::FourSimple);
    /// ```
    pub fn new(coeffs: &[f64; 5]) -> Self {
        let vars = [coeffs[4], coeffs[3], coeffs[2], coeffs[1], coeffs[0]];
        exact_invariants(&vars).unwrap_or_else(|| Self {
            delta: float_invariant(&DISCRIMINANT, &vars),
            p: float_invariant(&P_TERMS, &vars),
            r: float_invariant(&R_TERMS, &vars),
            delta0: float_invariant(&DELTA0_TERMS, &vars),
            d: float_invariant(&D_TERMS, &vars),
        })
    }
}

fn exact_invariants(vars: &[f64; 5]) -> Option<QuarticInvariants> {
    let mut ints = as_exact_integers(vars)?;
    reduce_by_gcd(&mut ints);
    let eval = |terms: &[Term]| -> Option<f64> {
        let value = checked_sum(terms.iter().map(|(k, exps)| {
            ints.iter()
                .zip(exps)
                .try_fold(i128::from(*k), |acc, (&v, &e)| acc.checked_mul(v.checked_pow(e)?))
        }))?;
        Some(value as f64)
    };
    Some(QuarticInvariants {
        delta: eval(&DISCRIMINANT)?,
        p: eval(&P_TERMS)?,
        r: eval(&R_TERMS)?,
        delta0: eval(&DELTA0_TERMS)?,
        d: eval(&D_TERMS)?,
    })
}

fn float_invariant(terms: &[Term], vars: &[f64; 5]) -> f64 {
    let mut sum = KahanSum::new();
    let mut err = 0.0;
    for (k, exps) in terms {
        let term = vars
            .iter()
            .zip(exps)
            .fold(f64::from(*k), |acc, (&v, &e)| acc * v.powi(e as i32));
        err += ulp(term);
        sum.add(term);
    }
    let value = sum.value();
    if value.abs() <= scalb(err, 5) {
        0.0
    } else {
        value
    }
}

/// Nature of the real roots of a quartic, as decided by the signs of its
/// [`QuarticInvariants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarticCase {
    /// Two simple real roots and a complex pair (Δ < 0)
    TwoSimple,
    /// Four simple real roots
    FourSimple,
    /// No real roots
    NoReal,
    /// One double root and two simple roots
    DoubleAndTwoSimple,
    /// One double root and a complex pair
    SingleDouble,
    /// A triple root and a simple root
    TripleAndSimple,
    /// Two distinct double roots
    TwoDouble,
    /// A single root of multiplicity four
    Quadruple,
    /// A sign pattern that rounding made inconsistent
    Unclassified,
}

impl QuarticCase {
    /// Classify from the invariant signs.
    pub fn classify(inv: &QuarticInvariants) -> Self {
        let QuarticInvariants {
            delta,
            p,
            r,
            delta0,
            d,
        } = *inv;
        if delta < 0.0 {
            QuarticCase::TwoSimple
        } else if delta > 0.0 {
            if p < 0.0 && d < 0.0 {
                QuarticCase::FourSimple
            } else if p > 0.0 || d > 0.0 {
                QuarticCase::NoReal
            } else {
                QuarticCase::Unclassified
            }
        } else if p < 0.0 && d < 0.0 && delta0 != 0.0 {
            QuarticCase::DoubleAndTwoSimple
        } else if d > 0.0 || (p > 0.0 && (d != 0.0 || r != 0.0)) {
            QuarticCase::SingleDouble
        } else if delta0 == 0.0 && d != 0.0 {
            QuarticCase::TripleAndSimple
        } else if d == 0.0 {
            if p < 0.0 {
                QuarticCase::TwoDouble
            } else if p > 0.0 && r == 0.0 {
                QuarticCase::NoReal
            } else if delta0 == 0.0 {
                QuarticCase::Quadruple
            } else {
                QuarticCase::Unclassified
            }
        } else {
            QuarticCase::Unclassified
        }
    }

    /// Number of distinct real roots, `None` when unclassified.
    pub fn distinct_real_roots(&self) -> Option<usize> {
        match self {
            QuarticCase::NoReal => Some(0),
            QuarticCase::SingleDouble | QuarticCase::Quadruple => Some(1),
            QuarticCase::TwoSimple | QuarticCase::TripleAndSimple | QuarticCase::TwoDouble => {
                Some(2)
            }
            QuarticCase::DoubleAndTwoSimple => Some(3),
            QuarticCase::FourSimple => Some(4),
            QuarticCase::Unclassified => None,
        }
    }
}

/// Real roots of `e + d·x + c·x² + b·x³ + a·x⁴`, given as `[e, d, c, b, a]`.
///
/// # Errors
///
/// `SolverError::InvalidArgument` for malformed input; convergence errors
/// only from the numerical fallback.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomials::solve_quartic;
///
/// // x⁴ + 1 has no real roots
/// assert!(solve_quartic(&[1.0, 0.0, 0.0, 0.0, 1.0]).unwrap().is_empty());
///
/// // (x² - 1)(x² - 4)
/// assert_eq!(
///     solve_quartic(&[4.0, 0.0, -5.0, 0.0, 1.0]).unwrap(),
///     vec![-2.0, -1.0, 1.0, 2.0]
/// );
/// ```
pub fn solve_quartic(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let coeffs = prepare(coeffs, Some(4))?;
    quartic(coeffs)
}

/// Real roots of `e + d·x + c·x² + a·x⁴`, given as `[e, d, c, 0, a]`.
///
/// # Errors
///
/// `SolverError::InvalidArgument` if the `x³` coefficient is not zero, or for
/// malformed input.
pub fn solve_depressed_quartic(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let coeffs = prepare(coeffs, Some(4))?;
    if coeffs.len() == 5 && coeffs[3] != 0.0 {
        return Err(SolverError::InvalidArgument(format!(
            "depressed quartic requires a zero x³ coefficient, got {}",
            coeffs[3]
        )));
    }
    quartic(coeffs)
}

/// Roots of a quartic whose leading coefficient may vanish.
pub(crate) fn quartic(coeffs: &[f64]) -> Result<Vec<f64>, SolverError> {
    let coeffs = trim_trailing_zeros(coeffs);
    if coeffs.len() < 5 {
        return cubic(coeffs);
    }
    let (e, d, c, b, a) = (coeffs[0], coeffs[1], coeffs[2], coeffs[3], coeffs[4]);

    if e == 0.0 {
        let mut roots = cubic(&coeffs[1..])?;
        roots.push(0.0);
        sort_dedup(&mut roots);
        return Ok(roots);
    }
    if b == 0.0 && d == 0.0 {
        return biquadratic(coeffs, &[e, c, a]);
    }

    let inv = QuarticInvariants::new(&[e, d, c, b, a]);
    let case = QuarticCase::classify(&inv);
    match case {
        QuarticCase::NoReal => Ok(Vec::new()),
        QuarticCase::Quadruple => Ok(vec![polish_multiple(coeffs, -b / (4.0 * a))?]),
        QuarticCase::SingleDouble => {
            let cpts = cubic(&derivative_coefficients(coeffs))?;
            match best_candidate(coeffs, &cpts) {
                Some(r) => Ok(vec![polish_multiple(coeffs, r)?]),
                None => fall_back(coeffs, case),
            }
        }
        QuarticCase::TwoDouble => {
            let mut cpts = cubic(&derivative_coefficients(coeffs))?;
            if cpts.len() < 3 {
                return fall_back(coeffs, case);
            }
            // The local extremum between the two double roots is not a root
            let p = Polynomial::<Kahan>::new(coeffs);
            cpts.sort_by(|&x, &y| p.value(x).abs().total_cmp(&p.value(y).abs()));
            let mut roots = vec![
                polish_multiple(coeffs, cpts[0])?,
                polish_multiple(coeffs, cpts[1])?,
            ];
            sort_dedup(&mut roots);
            Ok(roots)
        }
        QuarticCase::TripleAndSimple => {
            // f''/2 = 6a·x² + 3b·x + c vanishes at the triple root
            let ipts = quadratic(&[c, 3.0 * b, 6.0 * a])?;
            match best_candidate(coeffs, &ipts) {
                Some(t) => {
                    let t = polish_multiple(coeffs, t)?;
                    let mut roots = vec![t, polish(coeffs, -b / a - 3.0 * t)?];
                    sort_dedup(&mut roots);
                    Ok(roots)
                }
                None => fall_back(coeffs, case),
            }
        }
        QuarticCase::TwoSimple => resolvent(coeffs, case, 2, None),
        QuarticCase::FourSimple => resolvent(coeffs, case, 4, None),
        QuarticCase::DoubleAndTwoSimple => {
            let cpts = cubic(&derivative_coefficients(coeffs))?;
            let double = best_candidate(coeffs, &cpts)
                .map(|r| polish_multiple(coeffs, r))
                .transpose()?;
            resolvent(coeffs, case, 3, double)
        }
        QuarticCase::Unclassified => fall_back(coeffs, case),
    }
}

/// `a·x⁴ + c·x² + e` as a quadratic in `z = x²`.
fn biquadratic(coeffs: &[f64], z_coeffs: &[f64; 3]) -> Result<Vec<f64>, SolverError> {
    let mut roots = Vec::new();
    for z in quadratic(z_coeffs)? {
        if z > 0.0 {
            let s = z.sqrt();
            roots.push(polish(coeffs, s)?);
            roots.push(polish(coeffs, -s)?);
        } else if z == 0.0 {
            roots.push(0.0);
        }
    }
    sort_dedup(&mut roots);
    Ok(roots)
}

/// Ferrari's method for a quartic known to have `expected` distinct real
/// roots, `double` being the double root if there is one.
fn resolvent(
    coeffs: &[f64],
    case: QuarticCase,
    expected: usize,
    double: Option<f64>,
) -> Result<Vec<f64>, SolverError> {
    let (e, d, c, b, a) = (coeffs[0], coeffs[1], coeffs[2], coeffs[3], coeffs[4]);

    // Depressed quartic y⁴ + p·y² + q·y + r with x = y - b/4a
    let (p, q, r) = if b == 0.0 {
        (c / a, d / a, e / a)
    } else {
        let (a2, b2) = (a * a, b * b);
        (
            (8.0 * a * c - 3.0 * b2) / (8.0 * a2),
            (b2 * b - 4.0 * a * b * c + 8.0 * d * a2) / (8.0 * a2 * a),
            (-3.0 * b2 * b2 + 256.0 * e * a2 * a - 64.0 * d * b * a2 + 16.0 * c * b2 * a)
                / (256.0 * a2 * a2),
        )
    };
    let offset = -b / (4.0 * a);

    let m = cubic(&[-q * q, 2.0 * p * p - 8.0 * r, 8.0 * p, 8.0])?
        .last()
        .copied()
        .unwrap_or(0.0);

    let mut ys = Vec::with_capacity(4);
    if m > 0.0 {
        // (y² + s·y + A - B)(y² - s·y + A + B) with s² = 2m
        let s = (2.0 * m).sqrt();
        let big_a = p / 2.0 + m;
        let big_b = q / (2.0 * s);
        ys.extend(quadratic(&[big_a - big_b, s, 1.0])?);
        ys.extend(quadratic(&[big_a + big_b, -s, 1.0])?);
    } else if q == 0.0 {
        for z in quadratic(&[r, p, 1.0])? {
            if z >= 0.0 {
                ys.push(z.sqrt());
                ys.push(-z.sqrt());
            }
        }
    } else {
        return fall_back(coeffs, case);
    }

    let mut roots = Vec::with_capacity(ys.len());
    for y in ys {
        let x = polish(coeffs, y + offset)?;
        if is_negligible(coeffs, x) {
            roots.push(x);
        } else {
            debug!(x, "discarding spurious quartic root");
        }
    }
    sort_ascending(&mut roots);
    if roots.len() > expected {
        sort_dedup(&mut roots);
    }
    if let Some(m) = double {
        // Keep the candidates farthest from the double root
        roots.sort_by(|x, y| (y - m).abs().total_cmp(&(x - m).abs()));
        roots.truncate(expected - 1);
        roots.push(m);
        sort_dedup(&mut roots);
    }
    if roots.len() != expected {
        return fall_back(coeffs, case);
    }
    Ok(roots)
}

fn fall_back(coeffs: &[f64], case: QuarticCase) -> Result<Vec<f64>, SolverError> {
    debug!(?case, "quartic closed form inconclusive, using the general solver");
    solve_numerically(coeffs)
}
