//! Core types: solver errors and structured polynomial results.

pub mod error;
pub mod roots;

pub use error::{Method, SolverError};
pub use roots::PolynomialRoots;
