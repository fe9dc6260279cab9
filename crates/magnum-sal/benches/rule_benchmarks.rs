//! Rule evaluation benchmarks.
//!
//! Every rule check rescans the whole log, so cost grows linearly with the
//! number of recorded events. These benchmarks measure neighbor queries,
//! placement, and removal against logs of increasing length.
//!
//! Run with: `cargo bench --bench rule_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use magnum_sal::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A straight shaft of `depth` chambers along +y, each holding one miner,
/// followed by `churn` place/remove pairs at the far end.
fn build_shaft(depth: i64, churn: usize) -> MagnumSal {
    let mut game = MagnumSal::new();
    for y in 0..depth {
        game.add_chamber(0, y);
    }
    for y in 0..depth {
        game.place_miner(0, y).expect("shaft placement is always legal");
    }
    let tail = depth - 1;
    for _ in 0..churn {
        game.place_miner(0, tail).expect("stacking on the tail is legal");
        game.remove_miner(0, tail).expect("spare miner can leave");
    }
    game
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");
    for depth in [100i64, 1_000, 10_000] {
        let game = build_shaft(depth, 0);
        let mid = Coordinate::new(0, depth / 2);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &game, |b, game| {
            b.iter(|| black_box(game.neighbor_view().neighbors(black_box(mid))));
        });
    }
    group.finish();
}

fn bench_place_and_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_and_remove");
    for churn in [0usize, 1_000, 10_000] {
        let base = build_shaft(100, churn);
        group.bench_with_input(BenchmarkId::from_parameter(churn), &base, |b, base| {
            b.iter_batched(
                || base.clone(),
                |mut game| {
                    game.place_miner(0, 99).unwrap();
                    game.remove_miner(0, 99).unwrap();
                    game
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_rejected_removal(c: &mut Criterion) {
    let mut game = build_shaft(1_000, 0);
    c.bench_function("rejected_removal_mid_chain", |b| {
        b.iter(|| black_box(game.remove_miner(0, black_box(500)).is_err()));
    });
}

criterion_group!(
    benches,
    bench_neighbors,
    bench_place_and_remove,
    bench_rejected_removal
);
criterion_main!(benches);
