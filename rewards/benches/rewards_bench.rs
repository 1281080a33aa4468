use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pospool_rewards::{pool_apy, RewardEngine};
use pospool_types::{Address, Amount, BlockNumber};

fn engine_with_sections(n: usize) -> RewardEngine {
    let mut engine = RewardEngine::new();
    engine.track(&Address::new("0x01"));
    engine.rotate(1000, BlockNumber::new(0)).unwrap();
    for i in 1..n {
        engine
            .record_interest(
                Amount::from_cfx(10),
                1000,
                1000,
                BlockNumber::new(i as u64 * 100),
            )
            .unwrap();
    }
    engine
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewards_settle");

    for section_count in [1, 10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("settle", section_count),
            &section_count,
            |b, &n| {
                b.iter_batched(
                    || engine_with_sections(n),
                    |mut engine| {
                        black_box(engine.settle(&Address::new("0x01"), 500, 1000).unwrap())
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_record_interest(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewards_record_interest");

    // recording interest is O(1) regardless of log length
    for section_count in [1, 1000] {
        group.bench_with_input(
            BenchmarkId::new("record_interest", section_count),
            &section_count,
            |b, &n| {
                b.iter_batched(
                    || engine_with_sections(n),
                    |mut engine| {
                        engine
                            .record_interest(
                                Amount::from_cfx(10),
                                1000,
                                1000,
                                BlockNumber::new(u64::MAX / 2),
                            )
                            .unwrap()
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_apy(c: &mut Criterion) {
    let engine = engine_with_sections(1000);

    c.bench_function("rewards_pool_apy", |b| {
        b.iter(|| {
            black_box(pool_apy(
                engine.log(),
                BlockNumber::new(100_000),
                Amount::from_cfx(100),
                black_box(100_000),
                63_072_000,
            ))
        });
    });
}

criterion_group!(benches, bench_settle, bench_record_interest, bench_apy);
criterion_main!(benches);
