//! Brent's method root-finding solver.

use super::{residual, Bracket, SolverConfig};
use crate::math::fp::{scalb, sign_differs, signum, ulp};
use crate::traits::RealFunction;
use crate::types::{Method, SolverError};
use tracing::trace;

/// Safety net for the bracket loop; bisection alone needs fewer than 2200
/// halvings to cross the whole double range.
const ITERATION_LIMIT: usize = 4096;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to
/// converge for continuous functions with a valid bracket.
///
/// # Algorithm
///
/// Brent's method tracks three points `a`, `b`, `c` with `b` the best
/// estimate (`|f(b)| ≤ |f(a)|`) and switches between:
/// - **Inverse quadratic interpolation** when the three residuals differ
/// - **Secant method** otherwise
/// - **Bisection** when the interpolated step leaves `[(3a+b)/4, b]`, does
///   not halve the previous step, or falls below `32·ulp`
///
/// It stops once the residual is within `ulp(target) + ferror(x)` or the
/// bracket has collapsed to a few ULPs.
///
/// # Example
///
/// ```
/// use roots_core::math::solvers::{Brent, SolverConfig};
///
/// let solver = Brent::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(&f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Brent {
    /// Solver configuration
    config: SolverConfig,
}

impl Brent {
    /// Create a new Brent solver with the given configuration.
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

    /// Find `x` in the bracket with `f(x) = target`.
    ///
    /// Requires that `f(a) - target` and `f(b) - target` have opposite signs,
    /// unless one endpoint is already within tolerance, in which case that
    /// endpoint is returned.
    ///
    /// # Arguments
    ///
    /// * `f` - Function to solve
    /// * `target` - Desired function value
    /// * `a`, `b` - Bracket endpoints, in either order
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Solution inside `[min(a,b), max(a,b)]`
    /// * `Err(SolverError::NoBracket)` - Residuals at `a` and `b` have the same sign
    /// * `Err(SolverError::EvaluationFailed)` - `f` returned NaN
    ///
    /// # Example
    ///
    /// ```
    /// use roots_core::math::solvers::Brent;
    ///
    /// let solver = Brent::with_defaults();
    ///
    /// // Solve eˣ = 2 in bracket [0, 1]
    /// let root = solver.solve(&|x: f64| x.exp(), 2.0, 0.0, 1.0).unwrap();
    /// assert!((root - 2.0_f64.ln()).abs() < 1e-12);
    /// ```
    pub fn solve<F>(&self, f: &F, target: f64, a: f64, b: f64) -> Result<f64, SolverError>
    where
        F: RealFunction + ?Sized,
    {
        search(&self.config, f, target, Bracket::new(a, b), true, |_, _, _| None)
            .map(|(root, _)| root)
    }

    /// Find a root of `f` in the bracket `[a, b]`; same as `solve(f, 0.0, a, b)`.
    pub fn find_root<F>(&self, f: &F, a: f64, b: f64) -> Result<f64, SolverError>
    where
        F: RealFunction + ?Sized,
    {
        self.solve(f, 0.0, a, b)
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

/// Bracketed search shared by [`Brent`] and the derivative solvers.
///
/// `shortcut(s, f(s) - target, bracket)` is consulted after each
/// unsuccessful interpolation/bisection step; returning `Some(x)` ends the
/// search at `x`. The final bracket is returned with the root so callers can
/// keep narrowing it.
pub(crate) fn search<F, H>(
    config: &SolverConfig,
    f: &F,
    y: f64,
    bracket: Bracket,
    accept_endpoints: bool,
    mut shortcut: H,
) -> Result<(f64, Bracket), SolverError>
where
    F: RealFunction + ?Sized,
    H: FnMut(f64, f64, Bracket) -> Option<f64>,
{
    let mut a = bracket.lower();
    let mut b = bracket.upper();
    let mut fa = residual(f, a, y, Method::Brent)?;
    let mut fb = residual(f, b, y, Method::Brent)?;
    let uy = ulp(y);

    if accept_endpoints {
        if fa.abs() <= uy + config.ferror(f, a) {
            return Ok((a, bracket));
        }
        if fb.abs() <= uy + config.ferror(f, b) {
            return Ok((b, bracket));
        }
    }
    if signum(fa) == signum(fb) {
        return Err(SolverError::NoBracket { a, b });
    }

    // Ensure |f(a)| >= |f(b)|
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut c = a;
    let mut fc = fa;
    let mut d = 0.0;
    let mut mflag = true;

    for iteration in 0..ITERATION_LIMIT {
        let mut s = if fa != fc && fb != fc {
            // Inverse quadratic interpolation
            a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb))
        } else {
            // Secant method
            b - fb * (b - a) / (fb - fa)
        };

        let (t1, t2) = {
            let t1 = (3.0 * a + b) / 4.0;
            if t1 > b {
                (b, t1)
            } else {
                (t1, b)
            }
        };
        let lim1 = scalb(ulp(b).max(ulp(c)), 5);
        let lim2 = scalb(ulp(c).max(ulp(d)), 5);
        let bisect = !(s > t1 && s < t2)
            || (mflag && (s - b).abs() >= ((b - c) / 2.0).abs())
            || (!mflag && (s - b).abs() >= (c - d).abs() / 2.0)
            || (mflag && (b - c).abs() < lim1)
            || (!mflag && (c - d).abs() < lim2);
        if bisect {
            s = (a + b) / 2.0;
        }
        mflag = bisect;

        let fs = residual(f, s, y, Method::Brent)?;
        trace!(iteration, s, fs, bisect, "Brent step");
        let current = Bracket::new(a, b);
        if fs.abs() < uy + config.ferror(f, s) {
            return Ok((s, current));
        }
        if let Some(x) = shortcut(s, fs, current) {
            return Ok((x, current));
        }

        d = c;
        c = b;
        fc = fb;
        if sign_differs(fs, fa) {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
        if fb.abs() < scalb(uy + config.ferror(f, b), 5) {
            return Ok((b, Bracket::new(a, b)));
        }
        if (b - a).abs() <= scalb(ulp(b).max(ulp(a)), 5) {
            return Ok((b, Bracket::new(a, b)));
        }
    }

    Err(SolverError::MaxIterationsExceeded {
        method: Method::Brent,
        iterations: ITERATION_LIMIT,
    })
}
