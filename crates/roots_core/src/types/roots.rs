//! Structured polynomial solver results.

/// Real roots of a polynomial together with its critical points.
///
/// `roots` is ascending and free of duplicates. `critical_points` holds the
/// real zeros of the derivative (ascending) that the solver computed while
/// reducing the degree; the Bernstein solver only reports the ones lying in
/// `[0, 1]`.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomials::solve_polynomial_with_critical_points;
///
/// // x² - 1: roots ±1, one critical point at 0
/// let result = solve_polynomial_with_critical_points(&[-1.0, 0.0, 1.0]).unwrap();
/// assert_eq!(result.roots, vec![-1.0, 1.0]);
/// assert_eq!(result.critical_points, vec![0.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolynomialRoots {
    /// Real roots in ascending order
    pub roots: Vec<f64>,
    /// Zeros of the derivative in ascending order
    pub critical_points: Vec<f64>,
}

impl PolynomialRoots {
    /// Create a result from roots and critical points.
    pub fn new(roots: Vec<f64>, critical_points: Vec<f64>) -> Self {
        Self {
            roots,
            critical_points,
        }
    }

    /// Number of roots found.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns `true` when no real root was found.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of critical points found.
    pub fn critical_point_count(&self) -> usize {
        self.critical_points.len()
    }
}

impl From<PolynomialRoots> for Vec<f64> {
    fn from(result: PolynomialRoots) -> Self {
        result.roots
    }
}
