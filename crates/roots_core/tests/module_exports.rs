//! Integration tests for module exports.
//!
//! Verify that all public modules and types are exported and reachable via
//! absolute paths.

/// Floating-point helpers are accessible via absolute path.
#[test]
fn test_numeric_module_exports() {
    use roots_core::math::bernstein::{binomial, sum, to_monomial};
    use roots_core::math::exact::{as_exact_integer, gcd};
    use roots_core::math::fp::{next_down, next_up, scalb, signum, ulp};
    use roots_core::math::kahan::KahanSum;

    assert_eq!(ulp(1.0), f64::EPSILON);
    assert_eq!(scalb(1.0, 3), 8.0);
    assert_eq!(signum(0.0), 0.0);
    assert!(next_down(1.0) < 1.0 && next_up(1.0) > 1.0);

    let mut acc = KahanSum::new();
    acc.add(1.0_f64);
    acc.add(2.0);
    assert_eq!(acc.value(), 3.0);

    assert_eq!(as_exact_integer(12.0), Some(12));
    assert_eq!(gcd(12, 18), 6);

    assert_eq!(binomial(4, 2), 6.0);
    assert_eq!(sum(&[1.0, 3.0], 0.5), 2.0);
    assert_eq!(to_monomial(&[1.0, 3.0]), vec![1.0, 2.0]);
}

/// Solvers and their configuration are accessible via absolute path.
#[test]
fn test_solver_module_exports() {
    use roots_core::math::solvers::{
        refine_solution, refine_twiddle, Bracket, Brent, Halley, Newton, SolverConfig,
    };
    use roots_core::traits::Func;

    let config = SolverConfig::default();
    let f = Func::new(|x: f64| x * x - 4.0)
        .with_derivative(|x: f64| 2.0 * x)
        .with_second_derivative(|_: f64| 2.0);

    let brent = Brent::new(config).find_root(&f, 0.0, 5.0).unwrap();
    let newton = Newton::new(config).find_root(&f, 3.0, None).unwrap();
    let halley = Halley::new(config)
        .find_root(&f, 3.0, Some(Bracket::new(0.0, 5.0)))
        .unwrap();
    assert!((brent - 2.0).abs() < 1e-12);
    assert_eq!(newton, 2.0);
    assert_eq!(halley, 2.0);

    assert_eq!(refine_solution(&f, 0.0, 2.0).unwrap(), 2.0);
    assert_eq!(refine_twiddle(&f, 0.0, 2.0).unwrap(), 2.0);
}

/// Polynomial solvers are accessible via absolute path.
#[test]
fn test_polynomial_module_exports() {
    use roots_core::math::polynomial::{Horner, Kahan, Polynomial};
    use roots_core::math::polynomials::{
        solve_bezier, solve_bezier_with_critical_points, solve_cubic, solve_depressed_cubic,
        solve_depressed_quartic, solve_polynomial, solve_polynomial_with_critical_points,
        solve_quadratic, solve_quartic, QuarticCase, QuarticInvariants,
    };
    use roots_core::traits::RealFunction;

    let fast = Polynomial::<Horner>::new(&[-2.0, 0.0, 1.0]);
    let precise = Polynomial::<Kahan>::new(&[-2.0, 0.0, 1.0]);
    assert_eq!(fast.value(2.0), precise.value(2.0));

    assert_eq!(solve_quadratic(&[-4.0, 0.0, 1.0]).unwrap(), vec![-2.0, 2.0]);
    assert_eq!(solve_cubic(&[0.0, -1.0, 0.0, 1.0]).unwrap(), vec![-1.0, 0.0, 1.0]);
    assert_eq!(solve_depressed_cubic(&[0.0, -1.0, 0.0, 1.0]).unwrap().len(), 3);
    assert_eq!(solve_quartic(&[4.0, 0.0, -5.0, 0.0, 1.0]).unwrap(), vec![-2.0, -1.0, 1.0, 2.0]);
    assert_eq!(solve_depressed_quartic(&[4.0, 0.0, -5.0, 0.0, 1.0]).unwrap().len(), 4);
    assert_eq!(solve_polynomial(&[-1.0, 0.0, 1.0]).unwrap(), vec![-1.0, 1.0]);
    assert_eq!(
        solve_polynomial_with_critical_points(&[-1.0, 0.0, 1.0])
            .unwrap()
            .critical_points,
        vec![0.0]
    );
    assert_eq!(solve_bezier(&[-0.5, 0.5]).unwrap(), vec![0.5]);
    assert!(solve_bezier_with_critical_points(&[-0.5, 0.5]).unwrap().critical_points.is_empty());

    let invariants = QuarticInvariants::new(&[4.0, 0.0, -5.0, 0.0, 1.0]);
    assert_eq!(QuarticCase::classify(&invariants), QuarticCase::FourSimple);
}

/// Types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use roots_core::types::{Method, PolynomialRoots, SolverError};

    let result = PolynomialRoots::new(vec![1.0], vec![]);
    assert_eq!(result.len(), 1);
    assert_eq!(Vec::<f64>::from(result), vec![1.0]);

    let err = SolverError::MaxIterationsExceeded {
        method: Method::Brent,
        iterations: 10,
    };
    assert!(err.is_convergence_failure());
    assert!(!SolverError::InvalidArgument("x".to_string()).is_convergence_failure());
}
