//! Newton-Raphson root-finding solver.

use super::{brent_search, refine_solution, residual, Bracket, SolverConfig};
use crate::math::fp::ulp;
use crate::traits::{Differentiable, Func};
use crate::types::{Method, SolverError};
use tracing::{debug, trace};

/// Newton-Raphson root finder with bracket and stationary-point fallbacks.
///
/// Uses Newton's method: `x_{n+1} = x_n - (f(x_n) - y) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root, meaning the number
/// of correct digits approximately doubles each iteration. When it stalls
/// the solver recovers instead of failing where it can:
/// - An iterate leaving the optional [`Bracket`] switches to Brent steps
///   inside the bracket, returning to Newton once a Newton step improves
///   the residual
/// - A step that crosses the root but makes the residual worse is finished
///   by Brent between the two iterates
/// - A step that makes things worse without crossing the root, across a
///   sign change of `f'`, locates the stationary point between the iterates
///   and brackets the root with it
/// - Otherwise the whole bracket is searched, or the solve fails with a
///   convergence error when there is none
///
/// # Example
///
/// ```
/// use roots_core::math::solvers::{Newton, SolverConfig};
/// use roots_core::traits::Func;
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = Newton::new(SolverConfig::default());
///
/// let f = Func::new(|x: f64| x * x - 2.0).with_derivative(|x: f64| 2.0 * x);
///
/// let root = solver.find_root(&f, 1.0, None).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Newton {
    /// Solver configuration
    config: SolverConfig,
}

impl Newton {
    /// Create a new Newton-Raphson solver with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Solver configuration with tolerance and max iterations
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Solve `f(x) = target` starting from `guess`.
    ///
    /// # Arguments
    ///
    /// * `f` - Function with first derivative
    /// * `target` - Desired function value
    /// * `guess` - Initial guess
    /// * `bracket` - Optional interval the root is known to lie in; iterates
    ///   are kept inside it
    ///
    /// # Returns
    ///
    /// * `Ok(root)` - Converged root (refined when `config.optimized`)
    /// * `Err(SolverError::NotProgressing)` - Zero derivative, no bracket
    /// * `Err(SolverError::NotConverging)` - Residual stopped decreasing, no bracket
    /// * `Err(SolverError::MaxIterationsExceeded)` - Iteration budget spent, no bracket
    ///
    /// # Example
    ///
    /// ```
    /// use roots_core::math::solvers::{Bracket, Newton};
    /// use roots_core::traits::Func;
    ///
    /// // atan overshoots from x = 3; the bracket keeps the iteration in check
    /// let f = Func::new(|x: f64| x.atan()).with_derivative(|x: f64| 1.0 / (1.0 + x * x));
    /// let root = Newton::with_defaults()
    ///     .solve(&f, 0.0, 3.0, Some(Bracket::new(-1.0, 5.0)))
    ///     .unwrap();
    /// assert!(root.abs() < 1e-12);
    /// ```
    pub fn solve<F>(
        &self,
        f: &F,
        target: f64,
        guess: f64,
        bracket: Option<Bracket>,
    ) -> Result<f64, SolverError>
    where
        F: Differentiable + ?Sized,
    {
        iterate(
            &self.config,
            Method::Newton,
            f,
            target,
            guess,
            bracket,
            |x, fx| {
                let u = f.derivative(x);
                if u == 0.0 {
                    None
                } else {
                    Some(x - fx / u)
                }
            },
        )
    }

    /// Find a root of `f`; same as `solve(f, 0.0, guess, bracket)`.
    pub fn find_root<F>(&self, f: &F, guess: f64, bracket: Option<Bracket>) -> Result<f64, SolverError>
    where
        F: Differentiable + ?Sized,
    {
        self.solve(f, 0.0, guess, bracket)
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

/// `a` and `b` are non-zero with opposite signs.
fn straddles(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

/// Derivative-driven iteration shared by Newton and Halley.
///
/// `update(x, f(x) - y)` produces the next iterate, or `None` when the
/// update is undefined (zero derivative or zero Halley denominator).
pub(crate) fn iterate<F, U>(
    config: &SolverConfig,
    method: Method,
    f: &F,
    y: f64,
    guess: f64,
    bracket: Option<Bracket>,
    update: U,
) -> Result<f64, SolverError>
where
    F: Differentiable + ?Sized,
    U: Fn(f64, f64) -> Option<f64>,
{
    if guess.is_nan() {
        return Err(SolverError::InvalidArgument(
            "initial guess is NaN".to_string(),
        ));
    }
    let finish = |x: f64| {
        if config.optimized {
            refine_solution(f, y, x)
        } else {
            Ok(x)
        }
    };
    let between = |a: f64, b: f64| -> Result<f64, SolverError> {
        let (root, _) = brent_search(config, f, y, Bracket::new(a, b), true, |_, _, _| None)?;
        finish(root)
    };
    let fall_back = |bracket: Option<Bracket>, err: SolverError| match bracket {
        Some(b) => {
            debug!(%method, lower = b.lower(), upper = b.upper(), "falling back to Brent over bracket");
            between(b.lower(), b.upper())
        }
        None => Err(err),
    };

    let uy = ulp(y);
    let mut guess = guess;
    let mut rootval = residual(f, guess, y, method)?;
    if rootval.abs() < config.ferror(f, guess) + uy {
        return finish(guess);
    }

    let mut bracket = bracket;
    let mut iterations = 0;

    loop {
        let Some(mut x) = update(guess, rootval) else {
            return fall_back(bracket, SolverError::NotProgressing { method, x: guess });
        };
        let mut newrootval = residual(f, x, y, method)?;

        if let Some(b) = bracket {
            if !b.contains(x) {
                debug!(%method, x, "iterate left bracket, switching to Brent steps");
                let (bx, narrowed) = brent_search(config, f, y, b, false, |s, fs, current| {
                    let u = f.derivative(s);
                    if u == 0.0 {
                        return None;
                    }
                    let next = s - fs / u;
                    let improves = (f.value(next) - y).abs() < fs.abs();
                    (current.contains_strictly(next) && improves).then_some(next)
                })?;
                bracket = Some(narrowed);
                x = bx;
                newrootval = residual(f, x, y, method)?;
            }
        }

        trace!(%method, iterations, x, residual = newrootval, "iteration");
        if newrootval.abs() < uy + config.ferror(f, x) {
            return finish(x);
        }

        let diff = (x - guess).abs();
        let xerr = ulp(x) + ulp(guess);
        if straddles(rootval, newrootval) {
            if diff < xerr {
                // Adjacent iterates on either side of the root
                return if config.optimized {
                    finish(x)
                } else if newrootval.abs() < rootval.abs() {
                    Ok(x)
                } else {
                    Ok(guess)
                };
            }
            if newrootval.abs() >= rootval.abs() {
                debug!(%method, x, guess, "overshoot, finishing with Brent");
                return between(x, guess);
            }
        } else if newrootval.abs() >= rootval.abs() {
            // Both residuals share a sign, so the stationary point brackets
            // the root against either iterate
            let dg = f.derivative(guess);
            let dx = f.derivative(x);
            if !straddles(dg, dx) {
                return fall_back(bracket, SolverError::NotConverging { method, x: guess });
            }
            debug!(%method, x, guess, "searching for stationary point");
            let eps = dg.abs().min(dx.abs()) * 1e-3;
            let slope = Func::new(|t: f64| f.derivative(t)).with_error_bound(move |_t: f64| eps);
            let (xm, _) = brent_search(config, &slope, 0.0, Bracket::new(x, guess), false, |_, _, _| None)?;
            let xmval = residual(f, xm, y, method)?;
            if xmval == 0.0 {
                return finish(xm);
            }
            if straddles(newrootval, xmval) {
                return between(x, xm);
            }
            return fall_back(bracket, SolverError::NotConverging { method, x: guess });
        }

        guess = x;
        rootval = newrootval;
        if diff < xerr && rootval.abs() <= ulp(guess) + config.ferror(f, guess) {
            return finish(guess);
        }
        iterations += 1;
        if iterations > config.max_iterations {
            return fall_back(
                bracket,
                SolverError::MaxIterationsExceeded {
                    method,
                    iterations: config.max_iterations,
                },
            );
        }
    }
}
