use adgraph::{grad, grad_with, GraphConfig, SweepOrder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

#[path = "common/mod.rs"]
mod common;
use common::*;

fn bench_reverse_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse_gradient");
    for n in [2, 10, 100, 1000] {
        let x = make_input(n);

        group.bench_with_input(BenchmarkId::new("f64_eval", n), &x, |b, x| {
            b.iter(|| black_box(rosenbrock_f64(black_box(x))))
        });

        group.bench_with_input(BenchmarkId::new("rosenbrock_rev", n), &x, |b, x| {
            b.iter(|| black_box(grad(rosenbrock_graph, black_box(x))))
        });

        group.bench_with_input(BenchmarkId::new("rosenbrock_fd", n), &x, |b, x| {
            b.iter(|| black_box(finite_diff_gradient(rosenbrock_f64, x, 1e-7)))
        });

        group.bench_with_input(BenchmarkId::new("trig_chain_rev", n), &x, |b, x| {
            b.iter(|| black_box(grad(trig_chain_graph, black_box(x))))
        });
    }
    group.finish();
}

fn bench_sweep_order(c: &mut Criterion) {
    // trig_chain shares only leaves, so both orders compute the same gradient.
    let mut group = c.benchmark_group("sweep_order");
    for n in [10, 100, 1000] {
        let x = make_input(n);

        for sweep in [SweepOrder::Topological, SweepOrder::Recursive] {
            let cfg = GraphConfig::default().with_sweep(sweep);
            let id = format!("{sweep:?}").to_lowercase();
            group.bench_with_input(BenchmarkId::new(id, n), &x, |b, x| {
                b.iter(|| black_box(grad_with(cfg, trig_chain_graph, black_box(x))))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_reverse_gradient, bench_sweep_order);
criterion_main!(benches);
