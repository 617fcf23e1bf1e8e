//! Closed intervals handed to the bracketing solvers.

/// An ordered interval `[lower, upper]` expected to contain a root.
///
/// The constructor orders its endpoints, so `Bracket::new(2.0, 1.0)` and
/// `Bracket::new(1.0, 2.0)` are the same interval.
///
/// # Example
///
/// ```
/// use roots_core::math::solvers::Bracket;
///
/// let b = Bracket::new(3.0, -1.0);
/// assert_eq!(b.lower(), -1.0);
/// assert_eq!(b.upper(), 3.0);
/// assert!(b.contains(0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lower: f64,
    upper: f64,
}

impl Bracket {
    /// Create a bracket from two endpoints in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    /// Lower endpoint.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper endpoint.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns `true` if `lower <= x <= upper`.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Returns `true` if `lower < x < upper`.
    pub fn contains_strictly(&self, x: f64) -> bool {
        self.lower < x && x < self.upper
    }

    /// `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_endpoints() {
        let b = Bracket::new(2.0, 1.0);
        assert_eq!(b, Bracket::new(1.0, 2.0));
        assert_eq!(b.width(), 1.0);
        assert_eq!(b.midpoint(), 1.5);
    }

    #[test]
    fn test_contains() {
        let b = Bracket::new(0.0, 1.0);
        assert!(b.contains(0.0));
        assert!(!b.contains_strictly(0.0));
        assert!(b.contains_strictly(0.5));
        assert!(!b.contains(1.5));
    }
}
