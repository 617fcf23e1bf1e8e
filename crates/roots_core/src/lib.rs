//! # roots_core: Real Root Finding in Double Precision
//!
//! ## Role
//!
//! roots_core provides the numerical core of the workspace:
//! - Iterative solvers for scalar functions (`math::solvers`): Brent's
//!   bracketing method, Newton and Halley steps with bracket fallback, and
//!   ULP-level refinement of an approximate root
//! - Closed-form and recursive polynomial solvers (`math::polynomials`) for
//!   the monomial and the Bernstein basis
//! - Floating-point building blocks (`math::fp`, `math::kahan`, `math::exact`)
//! - Capability traits for the functions handed to the solvers (`traits`)
//! - Error and result types: `SolverError`, `PolynomialRoots` (`types`)
//!
//! ## Minimal Dependencies
//!
//! - num-traits: Generic floating-point bounds for compensated summation
//! - num-dual: Dual numbers for automatic derivatives (optional)
//! - thiserror: Error derivation
//! - tracing: Fallback and iteration events (no subscriber is installed)
//! - serde: Serialisation of configuration, errors and results (optional)
//!
//! All computation is synchronous and allocation-light. Solvers hold only
//! their configuration, so one instance can be shared between threads.
//!
//! ## Usage Examples
//!
//! ```rust
//! use roots_core::math::polynomials::{solve_cubic, solve_quadratic};
//! use roots_core::math::solvers::Newton;
//! use roots_core::traits::Func;
//!
//! // Polynomials take ascending coefficients
//! assert_eq!(solve_quadratic(&[-1.0, 0.0, 1.0]).unwrap(), vec![-1.0, 1.0]);
//! assert_eq!(solve_cubic(&[-6.0, 11.0, -6.0, 1.0]).unwrap(), vec![1.0, 2.0, 3.0]);
//!
//! // Arbitrary functions go through the iterative solvers
//! let f = Func::new(|x: f64| x * x * x - 2.0).with_derivative(|x: f64| 3.0 * x * x);
//! let root = Newton::with_defaults().find_root(&f, 1.0, None).unwrap();
//! # assert!((root - 2.0_f64.cbrt()).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): `DualFunction`, derivatives by dual numbers
//! - `serde` (default): Serialisation for `SolverConfig`, `SolverError`,
//!   `Method` and `PolynomialRoots`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
