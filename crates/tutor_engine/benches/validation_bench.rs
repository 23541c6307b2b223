use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tutor_engine::{are_equivalent, validate_step, Expression, ProblemType, ValidatorOptions};

fn benchmark_step_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_validation");
    let opts = ValidatorOptions::default();

    group.bench_function("linear_valid_step", |b| {
        b.iter(|| black_box(validate_step("2x + 3 = 7", "2x = 4", &opts)))
    });

    group.bench_function("linear_calculation_error", |b| {
        b.iter(|| black_box(validate_step("2x + 3 = 7", "2x = 10", &opts)))
    });

    group.bench_function("quadratic_factored", |b| {
        b.iter(|| black_box(validate_step("x^2 - 5x + 6 = 0", "(x-2)(x-3) = 0", &opts)))
    });

    group.finish();
}

fn benchmark_equivalence(c: &mut Criterion) {
    let mut group = c.benchmark_group("equivalence");
    let opts = ValidatorOptions::default();

    group.bench_function("binomial_expansion", |b| {
        let a = Expression::parse("(x+1)^5").unwrap();
        let e = Expression::parse("x^5 + 5x^4 + 10x^3 + 10x^2 + 5x + 1").unwrap();
        b.iter(|| black_box(are_equivalent(&a, &e, &opts)))
    });

    group.bench_function("parse_and_compare_long_sum", |b| {
        b.iter(|| {
            // x + 2x + ... + 20x
            let mut s = "x".to_string();
            for i in 2..=20 {
                s.push_str(&format!(" + {}x", i));
            }
            let a = Expression::parse(&s).unwrap();
            let e = Expression::parse("210x").unwrap();
            black_box(are_equivalent(&a, &e, &opts))
        })
    });

    group.finish();
}

fn benchmark_problem_type(c: &mut Criterion) {
    c.bench_function("detect_problem_type", |b| {
        b.iter(|| black_box(ProblemType::detect("sqrt(2x + 1) = x - 1", "x")))
    });
}

criterion_group!(
    benches,
    benchmark_step_validation,
    benchmark_equivalence,
    benchmark_problem_type
);
criterion_main!(benches);
