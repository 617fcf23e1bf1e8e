//! Numerical building blocks and the root solvers.
//!
//! - [`fp`]: ULP arithmetic and floating-point neighbours
//! - [`kahan`]: Compensated summation
//! - [`exact`]: Exact integer arithmetic for discriminants
//! - [`bernstein`]: Bernstein-basis evaluation and conversion
//! - [`polynomial`]: Monomial-basis evaluation strategies
//! - [`solvers`]: Brent, Newton and Halley iterations plus refinement
//! - [`polynomials`]: Closed-form and recursive polynomial solvers

pub mod bernstein;
pub mod exact;
pub mod fp;
pub mod kahan;
pub mod polynomial;
pub mod polynomials;
pub mod solvers;
