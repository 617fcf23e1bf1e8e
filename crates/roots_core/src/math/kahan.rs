//! Compensated (Kahan) summation.

use num_traits::Float;

/// Running sum that carries the low-order bits lost by each addition.
///
/// # Example
///
/// ```
/// use roots_core::math::kahan::KahanSum;
///
/// let mut sum = KahanSum::new();
/// sum.add(1.0_f64);
/// for _ in 0..10 {
///     sum.add(1e-16);
/// }
/// assert!(sum.value() > 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KahanSum<T: Float> {
    sum: T,
    compensation: T,
}

impl<T: Float> Default for KahanSum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> KahanSum<T> {
    /// Start a sum at zero.
    pub fn new() -> Self {
        Self {
            sum: T::zero(),
            compensation: T::zero(),
        }
    }

    /// Start a sum at `initial`.
    pub fn with_initial(initial: T) -> Self {
        Self {
            sum: initial,
            compensation: T::zero(),
        }
    }

    /// Add one term.
    #[inline]
    pub fn add(&mut self, term: T) {
        let y = term - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// Current value of the sum.
    #[inline]
    pub fn value(&self) -> T {
        self.sum
    }
}

impl<T: Float> Extend<T> for KahanSum<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for term in iter {
            self.add(term);
        }
    }
}

/// Compensated sum of a sequence of terms.
pub fn sum<T: Float, I: IntoIterator<Item = T>>(terms: I) -> T {
    let mut acc = KahanSum::new();
    acc.extend(terms);
    acc.value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_small_terms() {
        let naive = (0..1000).fold(1.0_f64, |acc, _| acc + 1e-17);
        assert_eq!(naive, 1.0);

        let compensated = sum(std::iter::once(1.0_f64).chain((0..1000).map(|_| 1e-17)));
        assert_relative_eq!(compensated, 1.0 + 1e-14, max_relative = 1e-15);
    }

    #[test]
    fn test_with_initial() {
        let mut acc = KahanSum::with_initial(2.0_f64);
        acc.add(3.0);
        assert_eq!(acc.value(), 5.0);
    }

    #[test]
    fn test_f32() {
        let s: f32 = sum([0.5_f32, 0.25, 0.25]);
        assert_eq!(s, 1.0);
    }
}
