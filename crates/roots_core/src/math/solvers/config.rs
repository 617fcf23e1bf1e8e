//! Solver configuration types.

use crate::traits::RealFunction;

/// Configuration for the iterative root finders.
///
/// Shared by [`Brent`](super::Brent), [`Newton`](super::Newton) and
/// [`Halley`](super::Halley). A solver holds nothing else, so one instance
/// can be reused (and shared between threads) for any number of `solve`
/// calls.
///
/// # Example
///
/// ```
/// use roots_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config = SolverConfig::default();
/// assert_eq!(config.tolerance, 1e-12);
/// assert_eq!(config.max_iterations, 128);
///
/// // Custom configuration
/// let custom = SolverConfig::new(1e-9, 64).relative(true).optimized(false);
/// assert!(custom.relative);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Error allowance (epsilon) for a function value.
    ///
    /// A root `x` for target `y` satisfies `|f(x) - y| ≤ ulp(y) + ferror(x)`,
    /// where `ferror(x)` is this tolerance, or `|f(x)|·tolerance` when
    /// `relative` is set, unless the function supplies its own bound.
    pub tolerance: f64,

    /// Interpret `tolerance` relative to `|f(x)|`.
    pub relative: bool,

    /// Maximum number of iterations before giving up.
    ///
    /// Exceeding it returns `SolverError::MaxIterationsExceeded` unless a
    /// bracket fallback is available.
    pub max_iterations: usize,

    /// Run the refinement pass on Newton/Halley results.
    ///
    /// Turning it off trades the last few ULPs for speed when the caller
    /// refines externally.
    pub optimized: bool,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `tolerance`: 1e-12 (absolute)
    /// - `max_iterations`: 128
    /// - `optimized`: true
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            relative: false,
            max_iterations: 128,
            optimized: true,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with an absolute tolerance.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Error allowance (must be positive)
    /// * `max_iterations` - Maximum iteration count (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use roots_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-10, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(tolerance > 0.0, "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Configuration with a tighter tolerance (1e-15) and 512 iterations.
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-15,
            max_iterations: 512,
            ..Self::default()
        }
    }

    /// Configuration with a relaxed tolerance (1e-8), 50 iterations and no
    /// refinement pass.
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-8,
            relative: false,
            max_iterations: 50,
            optimized: false,
        }
    }

    /// Set whether the tolerance is relative to `|f(x)|`.
    pub fn relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    /// Set whether Newton/Halley results are refined.
    pub fn optimized(mut self, optimized: bool) -> Self {
        self.optimized = optimized;
        self
    }

    /// Error allowance `ferror(x)` for `f`.
    pub fn ferror<F: RealFunction + ?Sized>(&self, f: &F, x: f64) -> f64 {
        if let Some(bound) = f.error_bound(x) {
            return bound;
        }
        if self.relative {
            (f.value(x) * self.tolerance).abs()
        } else {
            self.tolerance
        }
    }
}
