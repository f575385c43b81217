//! lcert benchmarks
//!
//! Usage:
//!   cargo bench -p lcert                 # run all benchmarks
//!   cargo bench -p lcert -- window       # window summation only
//!   cargo bench -p lcert -- search       # counterexample search only

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lcert::{
    window_sum, CounterexampleSearch, ExplicitFormula, ExpansionPoint, Interval, LFunctionKind,
    MpfrOracle, Precision, PrimeTable, Encoding, VerificationMode, VonMangoldtSource,
};

fn synthetic_zeros(prec: Precision, n: usize) -> Vec<Interval> {
    let tol = Interval::parse(prec, "1e-8").unwrap();
    // roughly the spacing of zeta zeros at small height
    (1..=n)
        .map(|k| {
            let gamma = Interval::parse(prec, &format!("{}.{:03}", 10 + 2 * k, k % 1000)).unwrap();
            gamma.widen(&tol)
        })
        .collect()
}

fn bench_window_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("window");
    let prec = Precision::default();
    let x = Interval::parse(prec, "-1").unwrap();
    let y = Interval::parse(prec, "0").unwrap();

    for n in [1_000usize, 10_000] {
        let zeros = synthetic_zeros(prec, n);
        group.bench_function(BenchmarkId::new("riemann", n), |b| {
            b.iter(|| window_sum(black_box(&zeros), &x, &y, LFunctionKind::Riemann).unwrap())
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let prec = Precision::default();
    let x = Interval::parse(prec, "-1").unwrap();
    let base = Interval::parse(prec, "0.0162380206").unwrap();

    for (name, bound) in [("radius-11", "0.039"), ("radius-100", "0.0165")] {
        let upper = Interval::parse(prec, bound).unwrap();
        let search =
            CounterexampleSearch::new(&x, LFunctionKind::Riemann, VerificationMode::RiemannHypothesis);
        group.bench_function(BenchmarkId::new("riemann-hypothesis", name), |b| {
            b.iter(|| search.run(black_box(&base), &upper).unwrap())
        });
    }

    group.finish();
}

fn bench_prime_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("prime_sum");
    group.sample_size(10);
    let prec = Precision::default();
    let formula = ExplicitFormula::new(prec, &MpfrOracle);

    // e^Λ(n) for n ≤ 10
    let literals = ["1", "2", "3", "2", "5", "1", "7", "2", "3", "1"];
    let source = VonMangoldtSource::Table(PrimeTable::from_literals(
        Encoding::ExpLambda,
        literals.iter().cycle().take(10_000),
    ));

    for (x, y) in [("-1", "0"), ("-2", "1000")] {
        let point = ExpansionPoint::parse(prec, x, y).unwrap();
        group.bench_function(BenchmarkId::new("riemann", format!("({}, {})", x, y)), |b| {
            b.iter(|| {
                formula
                    .von_mangoldt_term(10_000, black_box(&point), LFunctionKind::Riemann, &source)
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_window_sum, bench_search, bench_prime_sum);
criterion_main!(benches);
