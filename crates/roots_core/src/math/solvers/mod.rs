//! Iterative root finders for scalar equations `f(x) = y`.
//!
//! ## Available Solvers
//!
//! - [`Brent`]: Bracketing hybrid of bisection, secant and inverse quadratic
//!   interpolation; needs only function values
//! - [`Newton`]: Quadratic convergence using the first derivative
//! - [`Halley`]: Cubic convergence using the first and second derivatives
//!
//! Newton and Halley recover from stalls on their own: an optional
//! [`Bracket`] lets them drop into Brent steps when an iterate leaves it, and
//! a sign change in the derivative triggers a search for the stationary
//! point that separates the iterates.
//!
//! ## Refinement
//!
//! [`refine_solution`] polishes a converged root to a floating-point local
//! optimum; [`refine_twiddle`] does the last step of that for value-only
//! functions.
//!
//! ## Configuration
//!
//! All solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Error allowance for a function value (default: 1e-12)
//! - `relative`: Scale the tolerance by `|f(x)|` (default: false)
//! - `max_iterations`: Maximum iteration count (default: 128)
//! - `optimized`: Refine Newton/Halley results (default: true)
//!
//! ## Examples
//!
//! ```
//! use roots_core::math::solvers::{Newton, SolverConfig};
//! use roots_core::traits::Func;
//!
//! // Solve x³ - 2 = 0 (find ∛2)
//! let solver = Newton::new(SolverConfig::default());
//! let f = Func::new(|x: f64| x * x * x - 2.0).with_derivative(|x: f64| 3.0 * x * x);
//!
//! let root = solver.find_root(&f, 1.0, None).unwrap();
//! assert!((root - 2.0_f64.cbrt()).abs() < 1e-15);
//! ```
//!
//! ```
//! use roots_core::math::solvers::{Bracket, Halley};
//! use roots_core::traits::Func;
//!
//! // cos(x) = x, kept inside [0, 1]
//! let f = Func::new(|x: f64| x.cos() - x)
//!     .with_derivative(|x: f64| -x.sin() - 1.0)
//!     .with_second_derivative(|x: f64| -x.cos());
//!
//! let root = Halley::with_defaults()
//!     .find_root(&f, 0.5, Some(Bracket::new(0.0, 1.0)))
//!     .unwrap();
//! assert!((root.cos() - root).abs() < 1e-15);
//! ```

mod bracket;
mod brent;
mod config;
mod halley;
mod newton;
mod refine;

// Re-export public types at module level
pub use bracket::Bracket;
pub use brent::Brent;
pub use config::SolverConfig;
pub use halley::Halley;
pub use newton::Newton;
pub use refine::{refine_solution, refine_twiddle};

pub(crate) use brent::search as brent_search;

use crate::traits::RealFunction;
use crate::types::{Method, SolverError};

/// `f(x) - y`, rejecting a NaN value from the callable.
pub(crate) fn residual<F>(f: &F, x: f64, y: f64, method: Method) -> Result<f64, SolverError>
where
    F: RealFunction + ?Sized,
{
    let value = f.value(x);
    if value.is_nan() {
        return Err(SolverError::EvaluationFailed { method, x });
    }
    Ok(value - y)
}
