//! Criterion benchmarks for IndexedHeap
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_perf
//!
//! # Only the shortest-path workloads
//! cargo bench --bench heap_perf -- 'dijkstra/'
//! ```
//!
//! ## Workloads
//!
//! - `push_pop`: fill with shuffled keys, then drain
//! - `update`: decrease-key on every element of a full heap
//! - `remove_if`: bulk predicate removal against one-by-one removal
//! - `dijkstra`: grid shortest paths, decrease-key frontier (`_opt`) against
//!   a `std::collections::BinaryHeap` with re-insertion (`_lazy`)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_indexed_heap::IndexedHeap;
use std::borrow::Borrow;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::hash::{Hash, Hasher};
use std::hint::black_box;

/// Deterministic permutation of `0..n`
fn shuffled(n: u64) -> Vec<u64> {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    let mut values: Vec<u64> = (0..n).collect();
    for i in (1..values.len()).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        values.swap(i, (state % (i as u64 + 1)) as usize);
    }
    values
}

#[derive(Clone, Copy)]
struct Keyed {
    id: u32,
    cost: u64,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Keyed {}

impl Hash for Keyed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Borrow<u32> for Keyed {
    fn borrow(&self) -> &u32 {
        &self.id
    }
}

fn by_cost(a: &Keyed, b: &Keyed) -> Ordering {
    a.cost.cmp(&b.cost)
}

fn benchmark_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");
    for size in [1_000u64, 10_000, 100_000] {
        let values = shuffled(size);
        group.bench_with_input(BenchmarkId::new("indexed", size), &values, |b, values| {
            b.iter(|| {
                let mut heap = IndexedHeap::with_capacity(values.len());
                for &v in values {
                    let _ = heap.push(v);
                }
                while let Some(v) = heap.pop() {
                    black_box(v);
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("std", size), &values, |b, values| {
            b.iter(|| {
                let mut heap = BinaryHeap::with_capacity(values.len());
                for &v in values {
                    heap.push(Reverse(v));
                }
                while let Some(v) = heap.pop() {
                    black_box(v);
                }
            })
        });
    }
    group.finish();
}

fn benchmark_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for size in [1_000u32, 10_000, 100_000] {
        group.bench_function(BenchmarkId::new("decrease_all", size), |b| {
            b.iter_batched(
                || {
                    let mut heap = IndexedHeap::with_comparator(
                        by_cost as fn(&Keyed, &Keyed) -> Ordering,
                    );
                    for id in 0..size {
                        let _ = heap.push(Keyed {
                            id,
                            cost: 1_000_000 + id as u64,
                        });
                    }
                    heap
                },
                |mut heap| {
                    for id in (0..size).rev() {
                        let _ = heap.update(&id, |k| k.cost = id as u64);
                    }
                    black_box(heap.peek().map(|k| k.id));
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn benchmark_remove_if(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_if");
    let values = shuffled(50_000);
    let heap: IndexedHeap<u64> = values.iter().copied().collect();

    group.bench_function("bulk", |b| {
        b.iter_batched(
            || heap.clone(),
            |mut heap| black_box(heap.remove_if(|x| x % 3 == 0)),
            criterion::BatchSize::LargeInput,
        )
    });
    group.bench_function("one_by_one", |b| {
        b.iter_batched(
            || heap.clone(),
            |mut heap| {
                let doomed: Vec<u64> = heap.iter().copied().filter(|x| x % 3 == 0).collect();
                for x in &doomed {
                    heap.remove(x);
                }
                black_box(heap.len())
            },
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

/// Square grid with pseudo-random edge weights
struct Grid {
    side: usize,
    weights: Vec<u64>,
}

impl Grid {
    fn new(side: usize) -> Self {
        let weights = shuffled((side * side) as u64)
            .into_iter()
            .map(|w| 1 + w % 9)
            .collect();
        Grid { side, weights }
    }

    fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        let side = self.side;
        let (x, y) = (node % side, node / side);
        let candidates = [
            (x > 0).then(|| node - 1),
            (x + 1 < side).then(|| node + 1),
            (y > 0).then(|| node - side),
            (y + 1 < side).then(|| node + side),
        ];
        candidates
            .into_iter()
            .flatten()
            .map(move |next| (next, self.weights[next]))
    }
}

fn dijkstra_decrease_key(grid: &Grid) -> u64 {
    let n = grid.side * grid.side;
    let mut dist = vec![u64::MAX; n];
    let mut open = IndexedHeap::with_comparator(by_cost as fn(&Keyed, &Keyed) -> Ordering);
    dist[0] = 0;
    let _ = open.push(Keyed { id: 0, cost: 0 });

    while let Some(Keyed { id, cost }) = open.pop() {
        for (next, weight) in grid.neighbors(id as usize) {
            let candidate = cost + weight;
            if candidate < dist[next] {
                let fresh = dist[next] == u64::MAX;
                dist[next] = candidate;
                let key = next as u32;
                if fresh {
                    let _ = open.push(Keyed {
                        id: key,
                        cost: candidate,
                    });
                } else {
                    let _ = open.update(&key, |k| k.cost = candidate);
                }
            }
        }
    }
    dist[n - 1]
}

fn dijkstra_lazy(grid: &Grid) -> u64 {
    let n = grid.side * grid.side;
    let mut dist = vec![u64::MAX; n];
    let mut open = BinaryHeap::new();
    dist[0] = 0;
    open.push(Reverse((0u64, 0usize)));

    while let Some(Reverse((cost, node))) = open.pop() {
        if cost > dist[node] {
            continue;
        }
        for (next, weight) in grid.neighbors(node) {
            let candidate = cost + weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                open.push(Reverse((candidate, next)));
            }
        }
    }
    dist[n - 1]
}

fn benchmark_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    group.sample_size(20);
    for side in [32usize, 128, 256] {
        let grid = Grid::new(side);
        let label = format!("{side}x{side}");
        group.bench_with_input(BenchmarkId::new("indexed_opt", &label), &grid, |b, grid| {
            b.iter(|| black_box(dijkstra_decrease_key(grid)))
        });
        group.bench_with_input(BenchmarkId::new("std_lazy", &label), &grid, |b, grid| {
            b.iter(|| black_box(dijkstra_lazy(grid)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_push_pop,
    benchmark_update,
    benchmark_remove_if,
    benchmark_dijkstra
);
criterion_main!(benches);
