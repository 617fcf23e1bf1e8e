//! Monomial-basis polynomial evaluation.
//!
//! Coefficients are ascending: `coeffs[i]` multiplies `xⁱ`. The evaluation
//! strategy is a type parameter so that the same solver code can run a fast
//! pass with [`Horner`] and a final high-accuracy pass with [`Kahan`].

use super::fp::{scalb, ulp};
use super::kahan::KahanSum;
use crate::traits::{Differentiable, RealFunction, TwiceDifferentiable};
use std::marker::PhantomData;

/// Strategy for evaluating a polynomial and its derivatives.
pub trait Evaluator {
    /// `Σ cᵢ·xⁱ`.
    fn value(coeffs: &[f64], x: f64) -> f64;

    /// `Σ i·cᵢ·xⁱ⁻¹`.
    fn derivative(coeffs: &[f64], x: f64) -> f64;

    /// `Σ i·(i-1)·cᵢ·xⁱ⁻²`.
    fn second_derivative(coeffs: &[f64], x: f64) -> f64;
}

/// Horner's rule, one multiply-add per coefficient.
#[derive(Debug, Clone, Copy, Default)]
pub struct Horner;

/// Compensated power-sum evaluation.
///
/// Slower than [`Horner`] but loses far less precision when terms cancel,
/// which is exactly the situation near a root.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kahan;

impl Evaluator for Horner {
    #[inline]
    fn value(coeffs: &[f64], x: f64) -> f64 {
        coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    #[inline]
    fn derivative(coeffs: &[f64], x: f64) -> f64 {
        coeffs
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (i, &c)| acc * x + i as f64 * c)
    }

    #[inline]
    fn second_derivative(coeffs: &[f64], x: f64) -> f64 {
        coeffs
            .iter()
            .enumerate()
            .skip(2)
            .rev()
            .fold(0.0, |acc, (i, &c)| acc * x + (i * (i - 1)) as f64 * c)
    }
}

impl Evaluator for Kahan {
    fn value(coeffs: &[f64], x: f64) -> f64 {
        let mut acc = KahanSum::new();
        let mut power = 1.0;
        for &c in coeffs {
            acc.add(c * power);
            power *= x;
        }
        acc.value()
    }

    fn derivative(coeffs: &[f64], x: f64) -> f64 {
        let mut acc = KahanSum::new();
        let mut power = 1.0;
        for (i, &c) in coeffs.iter().enumerate().skip(1) {
            acc.add(i as f64 * c * power);
            power *= x;
        }
        acc.value()
    }

    fn second_derivative(coeffs: &[f64], x: f64) -> f64 {
        let mut acc = KahanSum::new();
        let mut power = 1.0;
        for (i, &c) in coeffs.iter().enumerate().skip(2) {
            acc.add((i * (i - 1)) as f64 * c * power);
            power *= x;
        }
        acc.value()
    }
}

/// Rounding-error estimate `Σ ulp(cᵢ·xⁱ)` for evaluating `coeffs` at `x`.
pub fn term_error(coeffs: &[f64], x: f64) -> f64 {
    let mut power = 1.0;
    let mut err = 0.0;
    for &c in coeffs {
        err += ulp(c * power);
        power *= x;
    }
    err
}

/// Coefficients of the derivative polynomial.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomial::derivative_coefficients;
///
/// // d/dx (1 + 2x + 3x²) = 2 + 6x
/// assert_eq!(derivative_coefficients(&[1.0, 2.0, 3.0]), vec![2.0, 6.0]);
/// ```
pub fn derivative_coefficients(coeffs: &[f64]) -> Vec<f64> {
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, &c)| i as f64 * c)
        .collect()
}

/// Coefficient slice with trailing zeros removed.
pub fn trim_trailing_zeros(coeffs: &[f64]) -> &[f64] {
    let len = coeffs
        .iter()
        .rposition(|&c| c != 0.0)
        .map_or(0, |i| i + 1);
    &coeffs[..len]
}

/// Polynomial view implementing the function traits.
///
/// The error bound is `2^shift · Σ ulp(cᵢ·xⁱ)` (shift 5 by default), the
/// tolerance the polynomial solvers use to decide whether a residual is
/// indistinguishable from zero.
///
/// # Example
///
/// ```
/// use roots_core::math::polynomial::{Horner, Polynomial};
/// use roots_core::traits::RealFunction;
///
/// let p = Polynomial::<Horner>::new(&[-2.0, 0.0, 1.0]);
/// assert_eq!(p.value(3.0), 7.0);
/// assert!(p.error_bound(3.0).unwrap() > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Polynomial<'a, E = Horner> {
    coeffs: &'a [f64],
    error_shift: Option<i32>,
    evaluator: PhantomData<E>,
}

impl<'a, E: Evaluator> Polynomial<'a, E> {
    /// Default power-of-two scale applied to the term error.
    pub const DEFAULT_ERROR_SHIFT: i32 = 5;

    /// View `coeffs` (ascending powers) as a polynomial.
    pub fn new(coeffs: &'a [f64]) -> Self {
        Self {
            coeffs,
            error_shift: Some(Self::DEFAULT_ERROR_SHIFT),
            evaluator: PhantomData,
        }
    }

    /// Change the error-bound scale; `None` defers to the solver tolerance.
    pub fn with_error_shift(mut self, shift: Option<i32>) -> Self {
        self.error_shift = shift;
        self
    }

    /// Coefficients in ascending powers.
    pub fn coefficients(&self) -> &'a [f64] {
        self.coeffs
    }

    /// Index of the highest coefficient (the slice is not trimmed).
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Same coefficients, different evaluation strategy.
    pub fn evaluated_with<E2: Evaluator>(&self) -> Polynomial<'a, E2> {
        Polynomial {
            coeffs: self.coeffs,
            error_shift: self.error_shift,
            evaluator: PhantomData,
        }
    }
}

impl<E: Evaluator> RealFunction for Polynomial<'_, E> {
    #[inline]
    fn value(&self, x: f64) -> f64 {
        E::value(self.coeffs, x)
    }

    fn error_bound(&self, x: f64) -> Option<f64> {
        self.error_shift
            .map(|shift| scalb(term_error(self.coeffs, x), shift))
    }
}

impl<E: Evaluator> Differentiable for Polynomial<'_, E> {
    #[inline]
    fn derivative(&self, x: f64) -> f64 {
        E::derivative(self.coeffs, x)
    }
}

impl<E: Evaluator> TwiceDifferentiable for Polynomial<'_, E> {
    #[inline]
    fn second_derivative(&self, x: f64) -> f64 {
        E::second_derivative(self.coeffs, x)
    }
}
