use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphcut::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 4-connected grid with noisy data terms, as in binary image segmentation.
fn grid_graph(side: usize, seed: u64) -> Graph<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::with_capacity(side * side, 2 * side * side);
    graph.add_node(side * side).unwrap();
    for r in 0..side {
        for c in 0..side {
            let id = r * side + c;
            let bright = (r / 8 + c / 8) % 2 == 0;
            let noise = rng.gen_range(0..10);
            if bright {
                graph.add_tweights(id, noise, 30).unwrap();
            } else {
                graph.add_tweights(id, 30, noise).unwrap();
            }
            if c + 1 < side {
                graph.add_edge(id, id + 1, 12, 12).unwrap();
            }
            if r + 1 < side {
                graph.add_edge(id, id + side, 12, 12).unwrap();
            }
        }
    }
    graph
}

fn random_graph(n: usize, degree: usize, seed: u64) -> Graph<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::with_capacity(n, n * degree);
    graph.add_node(n).unwrap();
    for i in 0..n {
        graph
            .add_tweights(i, rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0))
            .unwrap();
    }
    for _ in 0..n * degree {
        let from = rng.gen_range(0..n);
        let to = rng.gen_range(0..n);
        graph
            .add_edge(from, to, rng.gen_range(0.0..5.0), rng.gen_range(0.0..5.0))
            .unwrap();
    }
    graph
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_cut_grid");
    for &side in &[32, 64, 128] {
        let graph = grid_graph(side, 17);
        group.bench_with_input(BenchmarkId::from_parameter(side), &graph, |b, graph| {
            b.iter(|| {
                let mut graph = graph.clone();
                black_box(graph.maxflow().unwrap())
            })
        });
    }
    group.finish();
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_cut_random");
    for &n in &[1_000, 10_000] {
        let graph = random_graph(n, 4, 5);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| {
                let mut graph = graph.clone();
                black_box(graph.maxflow().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid, bench_random);
criterion_main!(benches);
