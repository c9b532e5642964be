//! Engine benchmarks over pedagogically sized inputs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use algoviz_core::models::{GraphSpec, MatrixSpec};
use algoviz_engines::{dijkstra, floyd, prim, tsp};

/// Dense undirected mesh: every pair connected, weights spread out
/// deterministically.
fn mesh(n: usize) -> GraphSpec {
    let nodes: Vec<String> = (0..n).map(|i| format!("N{i:02}")).collect();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push((nodes[i].clone(), nodes[j].clone(), ((i * 7 + j * 3) % 19 + 1) as f64));
        }
    }
    GraphSpec {
        nodes: nodes.clone(),
        edges: edges
            .into_iter()
            .map(|(from, to, weight)| algoviz_core::models::EdgeSpec { from, to, weight })
            .collect(),
        directed: false,
    }
}

fn ring_matrix(n: usize) -> MatrixSpec {
    let cities: Vec<String> = (0..n).map(|i| format!("C{i:02}")).collect();
    let mut distances = vec![vec![0.0; n]; n];
    for (i, row) in distances.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            if i != j {
                *cell = ((i * 5 + j * 11) % 23 + 1) as f64;
            }
        }
    }
    MatrixSpec { cities, distances }
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines");

    let graph = mesh(24);
    group.bench_function("prim_mesh24", |b| {
        b.iter(|| black_box(prim::run(&graph, None).unwrap()));
    });
    group.bench_function("dijkstra_mesh24", |b| {
        b.iter(|| black_box(dijkstra::run(&graph, "N00").unwrap()));
    });
    group.bench_function("floyd_mesh24", |b| {
        b.iter(|| black_box(floyd::run(&graph).unwrap()));
    });

    let matrix = ring_matrix(10);
    group.bench_function("tsp_10_cities", |b| {
        b.iter(|| black_box(tsp::run(&matrix).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
