//! Integration tests for the dual-number function adapter.
//!
//! `DualFunction` derives the first and second derivative of a closure
//! written against `Dual2_64`, so it can drive all three solvers.

#![cfg(feature = "num-dual-mode")]

use approx::assert_relative_eq;
use num_dual::{Dual2_64, DualNum};
use roots_core::math::solvers::{Bracket, Brent, Halley, Newton};
use roots_core::traits::{Differentiable, DualFunction, RealFunction, TwiceDifferentiable};

/// Derivatives of a transcendental function match the analytic ones.
#[test]
fn test_dual_function_derivatives() {
    let f = DualFunction::new(|x: Dual2_64| x.exp() - x * 2.0);
    let x = 0.7_f64;
    assert_relative_eq!(f.value(x), x.exp() - 2.0 * x, epsilon = 1e-15);
    assert_relative_eq!(f.derivative(x), x.exp() - 2.0, epsilon = 1e-15);
    assert_relative_eq!(f.second_derivative(x), x.exp(), epsilon = 1e-15);
}

/// Newton and Halley agree with Brent on `cos(x) = x`.
#[test]
fn test_dual_function_drives_solvers() {
    let f = DualFunction::new(|x: Dual2_64| x.cos() - x);

    let brent = Brent::with_defaults().find_root(&f, 0.0, 1.0).unwrap();
    let newton = Newton::with_defaults().find_root(&f, 0.5, None).unwrap();
    let halley = Halley::with_defaults()
        .find_root(&f, 0.5, Some(Bracket::new(0.0, 1.0)))
        .unwrap();

    let dottie = 0.739_085_133_215_160_6;
    assert_relative_eq!(brent, dottie, epsilon = 1e-11);
    assert_relative_eq!(newton, dottie, epsilon = 1e-15);
    assert_relative_eq!(halley, dottie, epsilon = 1e-15);
}

/// `solve` hits a non-zero target value.
#[test]
fn test_dual_function_target() {
    let f = DualFunction::new(|x: Dual2_64| x.powi(3));
    let root = Halley::with_defaults().solve(&f, 8.0, 1.5, None).unwrap();
    assert_relative_eq!(root, 2.0, epsilon = 1e-15);
}
