//! Check command implementation
//!
//! Prints the effective configuration and runs the reference examples
//! against the solvers.

use std::io::Write;

use roots_core::math::polynomials::{solve_bezier, solve_cubic, solve_quadratic, solve_quartic};
use roots_core::math::solvers::{Brent, Newton, SolverConfig};
use roots_core::traits::Func;
use tracing::{info, warn};

use crate::config::RootsConfig;
use crate::{CliError, Result};

/// One self-test case: a name and the outcome
struct Case {
    name: &'static str,
    passed: bool,
    detail: String,
}

/// Run the check command
pub fn run<W: Write>(out: &mut W, config: &RootsConfig) -> Result<()> {
    info!("Checking configuration and solvers...");

    writeln!(out, "# Effective configuration")?;
    writeln!(out, "{}", config.to_toml()?)?;

    let cases = self_test(&config.solver);
    writeln!(out, "# Self-test")?;
    for case in &cases {
        let status = if case.passed { "ok" } else { "FAILED" };
        writeln!(out, "{:<8} {:<32} {}", status, case.name, case.detail)?;
    }

    let failed = cases.iter().filter(|c| !c.passed).count();
    if failed > 0 {
        warn!(failed, "self-test failures");
        return Err(CliError::SelfTest {
            failed,
            total: cases.len(),
        });
    }
    info!("All {} cases passed", cases.len());
    Ok(())
}

fn self_test(solver: &SolverConfig) -> Vec<Case> {
    let cube = Func::new(|x: f64| x * x * x - 2.0).with_derivative(|x: f64| 3.0 * x * x);
    let cbrt2 = 2.0_f64.cbrt();

    vec![
        exact_case("quadratic x² - 1", solve_quadratic(&[-1.0, 0.0, 1.0]), &[-1.0, 1.0]),
        exact_case(
            "cubic (x-1)(x-2)(x-3)",
            solve_cubic(&[-6.0, 11.0, -6.0, 1.0]),
            &[1.0, 2.0, 3.0],
        ),
        exact_case("quartic x⁴ + 1", solve_quartic(&[1.0, 0.0, 0.0, 0.0, 1.0]), &[]),
        exact_case("bezier line t - 0.5", solve_bezier(&[-0.5, 0.5]), &[0.5]),
        near_case(
            "newton x³ - 2 from 1",
            Newton::new(*solver).find_root(&cube, 1.0, None),
            cbrt2,
            4.0 * f64::EPSILON,
        ),
        near_case(
            "brent x³ - 2 on [0, 2]",
            Brent::new(*solver).find_root(&cube, 0.0, 2.0),
            cbrt2,
            solver.tolerance.max(f64::EPSILON),
        ),
    ]
}

fn exact_case(
    name: &'static str,
    result: std::result::Result<Vec<f64>, roots_core::types::SolverError>,
    expected: &[f64],
) -> Case {
    match result {
        Ok(roots) => Case {
            name,
            passed: roots == expected,
            detail: format!("{:?}", roots),
        },
        Err(err) => Case {
            name,
            passed: false,
            detail: err.to_string(),
        },
    }
}

fn near_case(
    name: &'static str,
    result: std::result::Result<f64, roots_core::types::SolverError>,
    expected: f64,
    tolerance: f64,
) -> Case {
    match result {
        Ok(root) => Case {
            name,
            passed: (root - expected).abs() <= tolerance,
            detail: format!("{}", root),
        },
        Err(err) => Case {
            name,
            passed: false,
            detail: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_passes_with_defaults() {
        let cases = self_test(&SolverConfig::default());
        assert_eq!(cases.len(), 6);
        for case in &cases {
            assert!(case.passed, "{} failed: {}", case.name, case.detail);
        }
    }

    #[test]
    fn test_check_output() {
        let mut buf = Vec::new();
        run(&mut buf, &RootsConfig::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Effective configuration"));
        assert!(text.contains("[solver]"));
        assert!(text.contains("ok       quadratic x² - 1"));
        assert!(!text.contains("FAILED"));
    }
}
