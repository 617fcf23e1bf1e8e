//! Halley's method root-finding solver.

use super::newton::iterate;
use super::{Bracket, SolverConfig};
use crate::traits::TwiceDifferentiable;
use crate::types::{Method, SolverError};

/// Halley root finder.
///
/// Uses the update
/// `x_{n+1} = x_n - 2·f(x_n)·f'(x_n) / (2·f'(x_n)² - f(x_n)·f''(x_n))`
/// (with `f` shifted by the target), which converges cubically near a simple
/// root. Stalls are handled exactly as in [`Newton`](super::Newton); a zero
/// denominator counts as "not progressing".
///
/// # Example
///
/// ```
/// use roots_core::math::solvers::Halley;
/// use roots_core::traits::Func;
///
/// let f = Func::new(|x: f64| x * x * x - 2.0)
///     .with_derivative(|x: f64| 3.0 * x * x)
///     .with_second_derivative(|x: f64| 6.0 * x);
///
/// let root = Halley::with_defaults().find_root(&f, 1.0, None).unwrap();
/// assert!((root - 2.0_f64.cbrt()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Halley {
    config: SolverConfig,
}

impl Halley {
    /// Create a new Halley solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Solve `f(x) = target` starting from `guess`, optionally keeping the
    /// iterates inside `bracket`.
    ///
    /// Returns the same errors as [`Newton::solve`](super::Newton::solve).
    pub fn solve<F>(
        &self,
        f: &F,
        target: f64,
        guess: f64,
        bracket: Option<Bracket>,
    ) -> Result<f64, SolverError>
    where
        F: TwiceDifferentiable + ?Sized,
    {
        iterate(
            &self.config,
            Method::Halley,
            f,
            target,
            guess,
            bracket,
            |x, fx| {
                let u = f.derivative(x);
                let w = f.second_derivative(x);
                let denom = 2.0 * u * u - fx * w;
                if denom == 0.0 {
                    None
                } else {
                    Some(x - 2.0 * fx * u / denom)
                }
            },
        )
    }

    /// Find a root of `f`; same as `solve(f, 0.0, guess, bracket)`.
    pub fn find_root<F>(&self, f: &F, guess: f64, bracket: Option<Bracket>) -> Result<f64, SolverError>
    where
        F: TwiceDifferentiable + ?Sized,
    {
        self.solve(f, 0.0, guess, bracket)
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}
