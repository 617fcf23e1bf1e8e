//! Bezier command implementation
//!
//! Solves a Bernstein-basis polynomial on `[0, 1]`.

use std::io::Write;

use roots_core::math::polynomials::{solve_bezier, solve_bezier_with_critical_points};
use tracing::{debug, info};

use super::{render, Report};
use crate::config::OutputConfig;
use crate::Result;

/// Run the bezier command
pub fn run<W: Write>(out: &mut W, weights: &[f64], critical: bool, output: &OutputConfig) -> Result<()> {
    info!("Solving Bernstein polynomial of degree {}", weights.len().saturating_sub(1));
    let report = solve(weights, critical)?;
    debug!(roots = ?report.roots, "solve complete");
    render(out, &report, output)
}

fn solve(weights: &[f64], critical: bool) -> Result<Report> {
    let (roots, critical_points) = if critical {
        let result = solve_bezier_with_critical_points(weights)?;
        (result.roots, Some(result.critical_points))
    } else {
        (solve_bezier(weights)?, None)
    };
    Ok(Report {
        input: weights.to_vec(),
        roots,
        critical_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_line() {
        let report = solve(&[-0.5, 0.5], false).unwrap();
        assert_eq!(report.roots, vec![0.5]);
        assert_eq!(report.input, vec![-0.5, 0.5]);
    }

    #[test]
    fn test_critical_points() {
        let report = solve(&[1.0, -1.0, 1.0], true).unwrap();
        assert_eq!(report.roots, vec![0.5]);
        assert_eq!(report.critical_points, Some(vec![0.5]));
    }

    #[test]
    fn test_invalid_weights() {
        assert!(matches!(solve(&[], false), Err(CliError::Solver(_))));
    }
}
