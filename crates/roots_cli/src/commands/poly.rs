//! Poly command implementation
//!
//! Solves a polynomial given by its ascending monomial coefficients, either
//! completely (closed forms and the recursive solver) or for a single root
//! with Newton or Brent iterations under the configured `SolverConfig`.

use std::io::Write;

use roots_core::math::polynomial::{Horner, Polynomial};
use roots_core::math::polynomials::{solve_polynomial, solve_polynomial_with_critical_points};
use roots_core::math::solvers::{Bracket, Brent, Newton, SolverConfig};
use tracing::{debug, info};

use super::{render, Report};
use crate::config::OutputConfig;
use crate::{CliError, Result};

/// Options of the poly command
#[derive(Debug, Clone, Default)]
pub struct PolyOptions {
    /// Also report the critical points
    pub critical: bool,
    /// Starting point for a single Newton search
    pub guess: Option<f64>,
    /// Interval holding a sign change
    pub bracket: Option<(f64, f64)>,
}

/// Run the poly command
pub fn run<W: Write>(
    out: &mut W,
    coefficients: &[f64],
    options: &PolyOptions,
    solver: &SolverConfig,
    output: &OutputConfig,
) -> Result<()> {
    info!("Solving polynomial of degree {}", coefficients.len().saturating_sub(1));
    let report = solve(coefficients, options, solver)?;
    debug!(roots = ?report.roots, "solve complete");
    render(out, &report, output)
}

fn solve(coefficients: &[f64], options: &PolyOptions, solver: &SolverConfig) -> Result<Report> {
    let bracket = options.bracket.map(|(lo, hi)| Bracket::new(lo, hi));
    if options.guess.is_some() || bracket.is_some() {
        if options.critical {
            return Err(CliError::InvalidArgument(
                "--critical cannot be combined with --guess or --bracket".to_string(),
            ));
        }
        if coefficients.is_empty() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(CliError::InvalidArgument(
                "coefficients must be finite and non-empty".to_string(),
            ));
        }
    }

    let p = Polynomial::<Horner>::new(coefficients);
    let (roots, critical_points) = match (options.guess, bracket) {
        (Some(guess), bracket) => {
            debug!(guess, ?bracket, "single root by Newton");
            (vec![Newton::new(*solver).find_root(&p, guess, bracket)?], None)
        }
        (None, Some(bracket)) => {
            debug!(?bracket, "single root by Brent");
            let root = Brent::new(*solver).find_root(&p, bracket.lower(), bracket.upper())?;
            (vec![root], None)
        }
        (None, None) if options.critical => {
            let result = solve_polynomial_with_critical_points(coefficients)?;
            (result.roots, Some(result.critical_points))
        }
        (None, None) => (solve_polynomial(coefficients)?, None),
    };
    Ok(Report {
        input: coefficients.to_vec(),
        roots,
        critical_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_roots() {
        let report = solve(&[-6.0, 11.0, -6.0, 1.0], &PolyOptions::default(), &SolverConfig::default())
            .unwrap();
        assert_eq!(report.roots, vec![1.0, 2.0, 3.0]);
        assert!(report.critical_points.is_none());
    }

    #[test]
    fn test_critical_points() {
        let options = PolyOptions {
            critical: true,
            ..Default::default()
        };
        let report = solve(&[-1.0, 0.0, 1.0], &options, &SolverConfig::default()).unwrap();
        assert_eq!(report.critical_points, Some(vec![0.0]));
    }

    #[test]
    fn test_newton_from_guess() {
        let options = PolyOptions {
            guess: Some(1.0),
            ..Default::default()
        };
        let report = solve(&[-2.0, 0.0, 0.0, 1.0], &options, &SolverConfig::default()).unwrap();
        assert!((report.roots[0] - 2.0_f64.cbrt()).abs() < 1e-15);
    }

    #[test]
    fn test_brent_in_bracket() {
        let options = PolyOptions {
            bracket: Some((2.0, 0.0)),
            ..Default::default()
        };
        let report = solve(&[-2.0, 0.0, 1.0], &options, &SolverConfig::default()).unwrap();
        assert!((report.roots[0] - std::f64::consts::SQRT_2).abs() < 1e-11);
    }

    #[test]
    fn test_rejects_conflicting_options() {
        let options = PolyOptions {
            critical: true,
            guess: Some(0.0),
            ..Default::default()
        };
        let err = solve(&[-1.0, 1.0], &options, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_degenerate_polynomial() {
        let err = solve(&[3.0], &PolyOptions::default(), &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Solver(_)));
    }
}
