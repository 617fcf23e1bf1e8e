//! Criterion benchmarks for roots_core solvers.
//!
//! Measures the closed-form polynomial solvers against the recursive general
//! solver, and the iterative solvers on a smooth scalar function.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roots_core::math::polynomials::{
    solve_bezier, solve_cubic, solve_polynomial, solve_quadratic, solve_quartic,
};
use roots_core::math::solvers::{Bracket, Brent, Halley, Newton};
use roots_core::traits::Func;

/// Monic polynomial with roots `1, 2, ..., n`.
fn integer_roots(n: usize) -> Vec<f64> {
    let mut coeffs = vec![1.0];
    for r in 1..=n {
        let r = r as f64;
        let mut next = vec![0.0; coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i + 1] += c;
            next[i] -= r * c;
        }
        coeffs = next;
    }
    coeffs
}

/// Benchmark the closed forms on polynomials with all roots real.
fn bench_closed_forms(c: &mut Criterion) {
    let mut group = c.benchmark_group("closed_forms");

    let quadratic = integer_roots(2);
    let cubic = integer_roots(3);
    let quartic = integer_roots(4);

    group.bench_function("quadratic", |b| {
        b.iter(|| solve_quadratic(black_box(&quadratic)).unwrap())
    });
    group.bench_function("cubic", |b| b.iter(|| solve_cubic(black_box(&cubic)).unwrap()));
    group.bench_function("quartic", |b| {
        b.iter(|| solve_quartic(black_box(&quartic)).unwrap())
    });

    group.finish();
}

/// Benchmark the recursive solver as the degree grows.
fn bench_general_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("general_solver");

    for degree in [5, 7, 9] {
        let coeffs = integer_roots(degree);
        group.bench_with_input(BenchmarkId::new("monomial", degree), &coeffs, |b, coeffs| {
            b.iter(|| solve_polynomial(black_box(coeffs)).unwrap())
        });
    }

    // (t - 0.25)(t - 0.5)(t - 0.75) in the Bernstein basis
    let beta = [-0.09375, 0.135_416_666_666_666_66, -0.135_416_666_666_666_66, 0.09375];
    group.bench_function("bezier_cubic", |b| {
        b.iter(|| solve_bezier(black_box(&beta)).unwrap())
    });

    group.finish();
}

/// Benchmark the iterative solvers on `cos(x) = x`.
fn bench_iterative_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterative_solvers");

    let f = Func::new(|x: f64| x.cos() - x)
        .with_derivative(|x: f64| -x.sin() - 1.0)
        .with_second_derivative(|x: f64| -x.cos());

    let brent = Brent::with_defaults();
    let newton = Newton::with_defaults();
    let halley = Halley::with_defaults();

    group.bench_function("brent", |b| {
        b.iter(|| brent.find_root(&f, black_box(0.0), black_box(1.0)).unwrap())
    });
    group.bench_function("newton", |b| {
        b.iter(|| newton.find_root(&f, black_box(0.5), None).unwrap())
    });
    group.bench_function("halley", |b| {
        b.iter(|| {
            halley
                .find_root(&f, black_box(0.5), Some(Bracket::new(0.0, 1.0)))
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_closed_forms,
    bench_general_solver,
    bench_iterative_solvers
);
criterion_main!(benches);
