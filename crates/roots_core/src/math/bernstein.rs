//! Bernstein-basis polynomials.
//!
//! A Bernstein polynomial of degree n is `Σ βᵢ·Bᵢ,ₙ(t)` with
//! `Bᵢ,ₙ(t) = C(n,i)·tⁱ·(1-t)ⁿ⁻ⁱ`. Evaluation uses de Casteljau's
//! algorithm, which only forms convex combinations and is therefore stable
//! on `[0, 1]`.
//!
//! Coefficient slices hold `n + 1` weights; the degree is `len - 1`.

use super::fp::ulp;
use super::kahan::KahanSum;

/// Binomial coefficient `C(n, k)` as a float.
///
/// # Example
///
/// ```
/// use roots_core::math::bernstein::binomial;
///
/// assert_eq!(binomial(5, 2), 10.0);
/// assert_eq!(binomial(4, 7), 0.0);
/// ```
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result.round()
}

/// Evaluate `Σ βᵢ·Bᵢ,ₙ(x)` with de Casteljau's algorithm.
///
/// # Example
///
/// ```
/// use roots_core::math::bernstein::sum;
///
/// // β = [-0.5, 0.5] is the line x - 0.5
/// assert_eq!(sum(&[-0.5, 0.5], 0.25), -0.25);
/// ```
pub fn sum(beta: &[f64], x: f64) -> f64 {
    match beta.len() {
        0 => 0.0,
        1 => beta[0],
        2 => beta[0] * (1.0 - x) + beta[1] * x,
        _ => {
            let mut scratch = beta.to_vec();
            sum_in_place(&mut scratch, x)
        }
    }
}

/// De Casteljau evaluation overwriting a caller-provided buffer.
///
/// The buffer holds the weights on entry; its contents are unspecified on
/// return.
pub fn sum_in_place(scratch: &mut [f64], x: f64) -> f64 {
    if scratch.is_empty() {
        return 0.0;
    }
    let x1 = 1.0 - x;
    let n = scratch.len() - 1;
    for j in 1..=n {
        for i in 0..=(n - j) {
            scratch[i] = scratch[i] * x1 + scratch[i + 1] * x;
        }
    }
    scratch[0]
}

/// First derivative of `Σ βᵢ·Bᵢ,ₙ(x)`.
pub fn derivative(beta: &[f64], x: f64) -> f64 {
    if beta.len() < 2 {
        return 0.0;
    }
    let n = beta.len() - 1;
    n as f64 * (sum(&beta[1..], x) - sum(&beta[..n], x))
}

/// Second derivative of `Σ βᵢ·Bᵢ,ₙ(x)`.
pub fn second_derivative(beta: &[f64], x: f64) -> f64 {
    if beta.len() < 3 {
        return 0.0;
    }
    let n = beta.len() - 1;
    n as f64 * (derivative(&beta[1..], x) - derivative(&beta[..n], x))
}

/// Rounding-error estimate for [`sum`] at `x`.
///
/// Propagates the coefficient ULPs and the ULP of `x` through the n levels of
/// the de Casteljau recursion.
pub fn error_bound(beta: &[f64], x: f64) -> f64 {
    if beta.len() < 2 {
        return 0.0;
    }
    let n = (beta.len() - 1) as f64;
    let x1 = 1.0 - x;
    let ex = ulp(x);
    let mx = x.max(x1);
    let (err_beta, max_beta) = beta.iter().fold((0.0_f64, 0.0_f64), |(e, m), &b| {
        let b = b.abs();
        (e.max(ulp(b)), m.max(b))
    });
    2.0 * n * (err_beta * mx + max_beta * ex)
}

/// Weights of the derivative polynomial, itself in the Bernstein basis of
/// degree n-1: `n·(βᵢ₊₁ - βᵢ)`.
pub fn derivative_weights(beta: &[f64]) -> Vec<f64> {
    if beta.len() < 2 {
        return Vec::new();
    }
    let n = (beta.len() - 1) as f64;
    beta.windows(2).map(|w| n * (w[1] - w[0])).collect()
}

/// Convert Bernstein weights to monomial coefficients (ascending powers).
///
/// Uses `Σⱼ βⱼBⱼ,ₙ(t) = Σᵢ Σₖ≤ᵢ βₖ(-1)^(i-k) C(n,i) C(i,k) tⁱ`, with each
/// inner sum compensated.
///
/// # Example
///
/// ```
/// use roots_core::math::bernstein::to_monomial;
///
/// assert_eq!(to_monomial(&[-0.5, 0.5]), vec![-0.5, 1.0]);
/// ```
pub fn to_monomial(beta: &[f64]) -> Vec<f64> {
    if beta.is_empty() {
        return Vec::new();
    }
    let n = beta.len() - 1;
    (0..=n)
        .map(|i| {
            let cni = binomial(n, i);
            let mut acc = KahanSum::new();
            for (k, &b) in beta.iter().enumerate().take(i + 1) {
                let term = b * cni * binomial(i, k);
                acc.add(if (i - k) % 2 == 0 { term } else { -term });
            }
            acc.value()
        })
        .collect()
}
