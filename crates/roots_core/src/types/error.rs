//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from the iterative solvers and polynomial solvers
//! - `Method`: The algorithm that raised a solver error

use std::fmt;
use thiserror::Error;

/// Algorithm that produced a [`SolverError`].
///
/// # Examples
/// ```
/// use roots_core::types::Method;
///
/// assert_eq!(format!("{}", Method::Halley), "Halley");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Bracketing inverse-quadratic/secant/bisection hybrid
    Brent,
    /// Newton's method with bracket fallback
    Newton,
    /// Halley's method with bracket fallback
    Halley,
    /// Post-convergence refinement
    Refine,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Brent => write!(f, "Brent"),
            Method::Newton => write!(f, "Newton"),
            Method::Halley => write!(f, "Halley"),
            Method::Refine => write!(f, "Refine"),
        }
    }
}

/// Root-finding solver errors.
///
/// Provides structured error handling for the iterative and polynomial
/// solvers with descriptive context for each failure mode.
///
/// # Variants
/// - `MaxIterationsExceeded`: Iteration budget exhausted
/// - `NoBracket`: Function values at bracket endpoints have the same sign
/// - `NotProgressing`: A zero derivative or denominator stopped the iteration
/// - `NotConverging`: The residual stopped decreasing with no fallback
/// - `InvalidArgument`: Malformed input (NaN guess, degenerate polynomial)
/// - `EvaluationFailed`: The supplied function produced NaN
///
/// # Examples
/// ```
/// use roots_core::types::{Method, SolverError};
///
/// let err = SolverError::MaxIterationsExceeded { method: Method::Newton, iterations: 128 };
/// assert!(format!("{}", err).contains("128 iterations"));
/// assert!(err.is_convergence_failure());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("{method} failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Algorithm that ran out of iterations
        method: Method,
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("Solution not bracketed: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Lower bracket endpoint
        a: f64,
        /// Upper bracket endpoint
        b: f64,
    },

    /// Derivative (or Halley denominator) vanished with no fallback.
    #[error("{method} not progressing at x = {x}")]
    NotProgressing {
        /// Algorithm that stalled
        method: Method,
        /// Last iterate
        x: f64,
    },

    /// Residual stopped decreasing with no bracket to fall back on.
    #[error("{method} not converging at x = {x}")]
    NotConverging {
        /// Algorithm that diverged
        method: Method,
        /// Last iterate
        x: f64,
    },

    /// Invalid input data or parameters.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The supplied function returned a non-number.
    #[error("Function evaluation failed in {method} at x = {x}")]
    EvaluationFailed {
        /// Algorithm that evaluated the function
        method: Method,
        /// Argument of the failed evaluation
        x: f64,
    },
}

impl SolverError {
    /// Returns `true` for errors raised because no iteration could make
    /// further progress (as opposed to bad input or a failing callable).
    pub fn is_convergence_failure(&self) -> bool {
        matches!(
            self,
            SolverError::MaxIterationsExceeded { .. }
                | SolverError::NoBracket { .. }
                | SolverError::NotProgressing { .. }
                | SolverError::NotConverging { .. }
        )
    }

    pub(crate) fn degenerate() -> Self {
        SolverError::InvalidArgument("degenerate polynomial: no coefficient above the constant term".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_bracket_display() {
        let err = SolverError::NoBracket { a: 1.0, b: 2.0 };
        assert_eq!(
            format!("{}", err),
            "Solution not bracketed: f(1) and f(2) have same sign"
        );
    }

    #[test]
    fn test_not_progressing_display() {
        let err = SolverError::NotProgressing {
            method: Method::Halley,
            x: 0.5,
        };
        assert_eq!(format!("{}", err), "Halley not progressing at x = 0.5");
    }

    #[test]
    fn test_convergence_family() {
        assert!(SolverError::NotConverging {
            method: Method::Newton,
            x: 0.0
        }
        .is_convergence_failure());
        assert!(!SolverError::InvalidArgument("nan".to_string()).is_convergence_failure());
        assert!(!SolverError::EvaluationFailed {
            method: Method::Brent,
            x: 1.0
        }
        .is_convergence_failure());
    }

    #[test]
    fn test_degenerate_message() {
        let err = SolverError::degenerate();
        assert!(format!("{}", err).contains("degenerate polynomial"));
    }

    #[test]
    fn test_error_clone_eq() {
        let err = SolverError::MaxIterationsExceeded {
            method: Method::Brent,
            iterations: 7,
        };
        assert_eq!(err.clone(), err);
    }
}
