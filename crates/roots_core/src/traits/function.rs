//! Evaluator capability traits for functions handed to the solvers.
//!
//! A solver asks only for what it needs:
//! - [`RealFunction`]: value and an optional error bound (Brent)
//! - [`Differentiable`]: adds the first derivative (Newton, refinement)
//! - [`TwiceDifferentiable`]: adds the second derivative (Halley)
//!
//! Closures are adapted with [`Func`], and with the `num-dual-mode` feature
//! [`DualFunction`] derives both derivatives automatically.

/// A real-valued function of one real variable.
pub trait RealFunction {
    /// Value of the function at `x`.
    fn value(&self, x: f64) -> f64;

    /// Expected floating-point error of [`value`](Self::value) at `x`.
    ///
    /// `None` lets the solver fall back on its configured tolerance.
    fn error_bound(&self, _x: f64) -> Option<f64> {
        None
    }
}

/// A function with a first derivative.
pub trait Differentiable: RealFunction {
    /// First derivative at `x`.
    fn derivative(&self, x: f64) -> f64;
}

/// A function with first and second derivatives.
pub trait TwiceDifferentiable: Differentiable {
    /// Second derivative at `x`.
    fn second_derivative(&self, x: f64) -> f64;
}

/// Plain closures are value-only functions.
impl<G: Fn(f64) -> f64> RealFunction for G {
    #[inline]
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Placeholder for a capability that was not supplied to [`Func`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Absent;

/// Closure adapter implementing the function traits.
///
/// Each capability is added with a builder method; the traits are only
/// implemented once the matching closure is present, so passing a
/// value-only function to Newton is a compile error rather than a runtime
/// failure.
///
/// # Example
///
/// ```
/// use roots_core::traits::{Differentiable, Func, RealFunction};
///
/// let f = Func::new(|x: f64| x * x - 2.0).with_derivative(|x: f64| 2.0 * x);
/// assert_eq!(f.value(2.0), 2.0);
/// assert_eq!(f.derivative(2.0), 4.0);
/// assert!(f.error_bound(2.0).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Func<F, D = Absent, D2 = Absent, E = Absent> {
    value: F,
    derivative: D,
    second_derivative: D2,
    error_bound: E,
}

impl<F: Fn(f64) -> f64> Func<F> {
    /// Wrap a value function.
    pub fn new(value: F) -> Self {
        Self {
            value,
            derivative: Absent,
            second_derivative: Absent,
            error_bound: Absent,
        }
    }
}

impl<F, D, D2, E> Func<F, D, D2, E> {
    /// Attach the first derivative.
    pub fn with_derivative<G: Fn(f64) -> f64>(self, derivative: G) -> Func<F, G, D2, E> {
        Func {
            value: self.value,
            derivative,
            second_derivative: self.second_derivative,
            error_bound: self.error_bound,
        }
    }

    /// Attach the second derivative.
    pub fn with_second_derivative<G: Fn(f64) -> f64>(self, second: G) -> Func<F, D, G, E> {
        Func {
            value: self.value,
            derivative: self.derivative,
            second_derivative: second,
            error_bound: self.error_bound,
        }
    }

    /// Attach a dedicated error-bound function replacing the solver's
    /// configured tolerance.
    pub fn with_error_bound<G: Fn(f64) -> f64>(self, error_bound: G) -> Func<F, D, D2, G> {
        Func {
            value: self.value,
            derivative: self.derivative,
            second_derivative: self.second_derivative,
            error_bound,
        }
    }
}

/// Optional error bound stored in a [`Func`].
pub trait MaybeBound {
    /// Bound at `x`, if one was supplied.
    fn bound(&self, x: f64) -> Option<f64>;
}

impl MaybeBound for Absent {
    fn bound(&self, _x: f64) -> Option<f64> {
        None
    }
}

impl<G: Fn(f64) -> f64> MaybeBound for G {
    fn bound(&self, x: f64) -> Option<f64> {
        Some(self(x))
    }
}

impl<F, D, D2, E> RealFunction for Func<F, D, D2, E>
where
    F: Fn(f64) -> f64,
    E: MaybeBound,
{
    fn value(&self, x: f64) -> f64 {
        (self.value)(x)
    }

    fn error_bound(&self, x: f64) -> Option<f64> {
        self.error_bound.bound(x)
    }
}

impl<F, D, D2, E> Differentiable for Func<F, D, D2, E>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
    E: MaybeBound,
{
    fn derivative(&self, x: f64) -> f64 {
        (self.derivative)(x)
    }
}

impl<F, D, D2, E> TwiceDifferentiable for Func<F, D, D2, E>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
    D2: Fn(f64) -> f64,
    E: MaybeBound,
{
    fn second_derivative(&self, x: f64) -> f64 {
        (self.second_derivative)(x)
    }
}

/// Function whose derivatives come from dual-number arithmetic.
///
/// The closure is evaluated on [`num_dual::Dual2_64`], which carries the
/// value together with the first and second derivative, so one closure
/// serves Brent, Newton and Halley alike.
///
/// # Example
///
/// ```
/// use num_dual::Dual2_64;
/// use roots_core::traits::{DualFunction, TwiceDifferentiable, Differentiable, RealFunction};
///
/// let f = DualFunction::new(|x: Dual2_64| x * x * x - Dual2_64::from(2.0));
/// assert_eq!(f.value(1.0), -1.0);
/// assert_eq!(f.derivative(1.0), 3.0);
/// assert_eq!(f.second_derivative(1.0), 6.0);
/// ```
#[cfg(feature = "num-dual-mode")]
#[derive(Debug, Clone, Copy)]
pub struct DualFunction<F> {
    function: F,
}

#[cfg(feature = "num-dual-mode")]
impl<F> DualFunction<F>
where
    F: Fn(num_dual::Dual2_64) -> num_dual::Dual2_64,
{
    /// Wrap a closure written against `Dual2_64`.
    pub fn new(function: F) -> Self {
        Self { function }
    }

    fn eval(&self, x: f64) -> num_dual::Dual2_64 {
        (self.function)(num_dual::Dual2_64::new(x, 1.0, 0.0))
    }
}

#[cfg(feature = "num-dual-mode")]
impl<F> RealFunction for DualFunction<F>
where
    F: Fn(num_dual::Dual2_64) -> num_dual::Dual2_64,
{
    fn value(&self, x: f64) -> f64 {
        self.eval(x).re
    }
}

#[cfg(feature = "num-dual-mode")]
impl<F> Differentiable for DualFunction<F>
where
    F: Fn(num_dual::Dual2_64) -> num_dual::Dual2_64,
{
    fn derivative(&self, x: f64) -> f64 {
        self.eval(x).v1
    }
}

#[cfg(feature = "num-dual-mode")]
impl<F> TwiceDifferentiable for DualFunction<F>
where
    F: Fn(num_dual::Dual2_64) -> num_dual::Dual2_64,
{
    fn second_derivative(&self, x: f64) -> f64 {
        self.eval(x).v2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_only() {
        let f = Func::new(|x: f64| x + 1.0);
        assert_eq!(f.value(1.0), 2.0);
        assert_eq!(f.error_bound(1.0), None);
    }

    #[test]
    fn test_error_bound_override() {
        let f = Func::new(|x: f64| x).with_error_bound(|x: f64| x.abs() * 1e-3);
        assert_eq!(f.error_bound(2.0), Some(2e-3));
    }

    #[test]
    fn test_builder_order_independent() {
        let f = Func::new(|x: f64| x * x * x)
            .with_second_derivative(|x: f64| 6.0 * x)
            .with_derivative(|x: f64| 3.0 * x * x);
        assert_eq!(f.value(2.0), 8.0);
        assert_eq!(f.derivative(2.0), 12.0);
        assert_eq!(f.second_derivative(2.0), 12.0);
    }

    #[test]
    fn test_closure_is_real_function() {
        fn eval<F: RealFunction + ?Sized>(f: &F, x: f64) -> f64 {
            f.value(x)
        }
        assert_eq!(eval(&|x: f64| 2.0 * x, 3.0), 6.0);
        assert_eq!((|x: f64| x).error_bound(1.0), None);
    }

    #[cfg(feature = "num-dual-mode")]
    #[test]
    fn test_dual_function_exp() {
        use num_dual::DualNum;
        let f = DualFunction::new(|x: num_dual::Dual2_64| x.exp());
        let e = 1.0_f64.exp();
        assert!((f.value(1.0) - e).abs() < 1e-15);
        assert!((f.derivative(1.0) - e).abs() < 1e-15);
        assert!((f.second_derivative(1.0) - e).abs() < 1e-15);
    }
}
