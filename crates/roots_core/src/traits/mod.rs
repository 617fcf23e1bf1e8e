//! Capability traits for the functions handed to the solvers.
//!
//! This module defines the abstractions for:
//! - Generic floating-point operations (`Float` trait)
//! - Function evaluation with optional derivatives and error bounds
//!   (`RealFunction`, `Differentiable`, `TwiceDifferentiable`)
//!
//! All solver entry points are generic over these traits, so closures,
//! polynomials and dual-number functions are dispatched statically.

/// Generic floating-point trait used by the compensated summation helpers.
///
/// # Examples
/// ```
/// use roots_core::traits::Float;
///
/// fn half<T: Float>(x: T) -> T {
///     x / (T::one() + T::one())
/// }
///
/// assert_eq!(half(3.0_f64), 1.5);
/// ```
pub use num_traits::Float;

pub mod function;

#[cfg(feature = "num-dual-mode")]
pub use function::DualFunction;
pub use function::{Absent, Differentiable, Func, MaybeBound, RealFunction, TwiceDifferentiable};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_trait_with_f64() {
        fn generic_sqrt<T: Float>(x: T) -> T {
            x.sqrt()
        }

        assert_eq!(generic_sqrt(4.0_f64), 2.0);
    }

    #[test]
    fn test_trait_objects_are_usable() {
        let f = Func::new(|x: f64| x * x).with_derivative(|x: f64| 2.0 * x);
        let dynamic: &dyn Differentiable = &f;
        assert_eq!(dynamic.value(3.0), 9.0);
        assert_eq!(dynamic.derivative(3.0), 6.0);
    }
}
