use criterion::{criterion_group, criterion_main, Criterion};
use scicalc::eval::evaluate;
use std::hint::black_box;

fn bench_evaluate(c: &mut Criterion) {
    c.bench_function("evaluate_arithmetic", |b| {
        b.iter(|| evaluate(black_box("2 + 3 * 4 - 10 / 4 ** 2")))
    });

    c.bench_function("evaluate_functions", |b| {
        b.iter(|| evaluate(black_box("sqrt(16) + sin(pi / 2) + log(100, 10) + abs(-2.5)")))
    });

    c.bench_function("reject_blacklisted", |b| {
        b.iter(|| evaluate(black_box("__import__('os').system('ls')")))
    });

    let nested = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    c.bench_function("evaluate_nested", |b| b.iter(|| evaluate(black_box(&nested))));
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
