//! Post-convergence polishing of roots.

use crate::math::fp::{next_down, next_up, sign_differs};
use crate::traits::{Differentiable, RealFunction};
use crate::types::SolverError;

/// Corrective Newton steps attempted by [`refine_solution`].
const REFINE_LIMIT: usize = 64;

/// ULP steps taken in one direction by the final twiddle.
const TWIDDLE_LIMIT: usize = 4;

/// Refine a converged solution of `f(x) = target`.
///
/// Takes Newton steps from `guess` as long as each one strictly reduces
/// `|f(x) - target|`. When a step crosses the root, the point obtained by
/// linear interpolation between the two iterates is tried as well. Once no
/// step helps, the neighbouring floating-point values are examined (see
/// [`refine_twiddle`]).
///
/// The result is a floating-point local optimum: neither adjacent
/// representable value has a smaller residual, so refining it again returns
/// it unchanged.
///
/// # Errors
///
/// `SolverError::InvalidArgument` if `guess` is NaN.
///
/// # Example
///
/// ```
/// use roots_core::math::solvers::refine_solution;
/// use roots_core::traits::Func;
///
/// let f = Func::new(|x: f64| x * x - 2.0).with_derivative(|x: f64| 2.0 * x);
/// let root = refine_solution(&f, 0.0, 1.4142).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() <= f64::EPSILON);
/// ```
pub fn refine_solution<F>(f: &F, target: f64, guess: f64) -> Result<f64, SolverError>
where
    F: Differentiable + ?Sized,
{
    if guess.is_nan() {
        return Err(SolverError::InvalidArgument(
            "refinement guess is NaN".to_string(),
        ));
    }
    let mut guess = guess;
    let mut r = f.value(guess) - target;
    let mut count = 0;
    while r != 0.0 && count < REFINE_LIMIT {
        count += 1;
        let d = f.derivative(guess);
        if d == 0.0 {
            break;
        }
        let mut x = guess - r / d;
        if x.is_nan() {
            break;
        }
        let mut rx = f.value(x) - target;
        if rx != 0.0 && sign_differs(r, rx) {
            // The root lies between guess and x
            let z = guess + (x - guess) * (r / (r - rx));
            let rz = f.value(z) - target;
            if rz.abs() < r.abs() && rz.abs() < rx.abs() {
                x = z;
                rx = rz;
            }
        }
        if rx.abs() < r.abs() {
            guess = x;
            r = rx;
        } else {
            break;
        }
    }
    refine_twiddle(f, target, guess)
}

/// Move `guess` to the adjacent floating-point value while that lowers
/// `|f(x) - target|`.
///
/// Only function values are used, so this is the refinement available for
/// functions without a derivative.
///
/// # Errors
///
/// `SolverError::InvalidArgument` if `guess` is NaN.
pub fn refine_twiddle<F>(f: &F, target: f64, guess: f64) -> Result<f64, SolverError>
where
    F: RealFunction + ?Sized,
{
    if guess.is_nan() {
        return Err(SolverError::InvalidArgument(
            "refinement guess is NaN".to_string(),
        ));
    }
    if guess.is_infinite() {
        return Ok(guess);
    }
    let err = |x: f64| (f.value(x) - target).abs();
    let current = err(guess);
    let up = next_up(guess);
    let down = next_down(guess);
    let err_up = err(up);
    let err_down = err(down);

    let (step, mut x, mut best): (fn(f64) -> f64, f64, f64) =
        if err_up < current && err_up <= err_down {
            (next_up, up, err_up)
        } else if err_down < current {
            (next_down, down, err_down)
        } else {
            return Ok(guess);
        };
    for _ in 0..TWIDDLE_LIMIT {
        let candidate = step(x);
        let e = err(candidate);
        if e < best {
            x = candidate;
            best = e;
        } else {
            break;
        }
    }
    Ok(x)
}
