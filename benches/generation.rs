//! Benchmarks for fakeseries generation throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fakeseries::{
    ColumnConfig, DataConfig, DataGenerator, PatternConfig, Series, SeriesConfig, TimeConfig,
};

fn full_config(samples: i64) -> DataConfig {
    DataConfig::new("bench", samples, 0.0, 100.0)
        .with_random_walk(42, 0.5)
        .with_stretch(0.5, 2.0)
        .with_slope(0.01)
        .with_permanent_bump(samples / 2, 10.0, 25)
        .with_spikes(200, 10, 95.0, 5)
        .with_wobble(3)
        .with_seasonality(&[24, 168])
        .with_limits(true, true)
        .with_stats()
}

fn bench_numeric(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric");

    for size in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("flat", size), &size, |b, &size| {
            b.iter(|| {
                let mut gen = DataGenerator::new(DataConfig::new("flat", size as i64, 0.0, 100.0))
                    .unwrap();
                black_box(gen.values(size))
            })
        });

        group.bench_with_input(BenchmarkId::new("all_stages", size), &size, |b, &size| {
            b.iter(|| {
                let mut gen = DataGenerator::new(full_config(size as i64)).unwrap();
                black_box(gen.values(size))
            })
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    let mut gen = DataGenerator::new(full_config(10_000)).unwrap();
    gen.values(1_000);

    group.bench_function("snapshot_after_100", |b| {
        b.iter(|| {
            gen.values(100);
            black_box(gen.stats_snapshot())
        })
    });

    group.finish();
}

fn bench_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("series");

    let config = SeriesConfig::new()
        .add_column(ColumnConfig::Time(
            TimeConfig::new("ts", TimeConfig::default().start, 60_000).with_seed(1),
        ))
        .add_column(ColumnConfig::Pattern(PatternConfig::new("ok", 23, 1)))
        .add_column(ColumnConfig::Data(full_config(1_000)))
        .with_gate("ok");

    group.throughput(Throughput::Elements(1_000));

    group.bench_function("rows_1000", |b| {
        b.iter(|| {
            let mut series = Series::new(config.clone()).unwrap();
            black_box(series.rows(1_000))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_numeric, bench_snapshot, bench_series);
criterion_main!(benches);
