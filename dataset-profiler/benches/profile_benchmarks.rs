//! Benchmarks for the profiling pipeline and chart projections.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dataset_profiler::analyzers::{
    count_duplicates, histogram, top_k, BinCount, SummaryEngine, TypeInferenceEngine,
};
use dataset_profiler::chart::{ChartProjectionBuilder, ChartRequest};
use dataset_profiler::dataset::Dataset;
use dataset_profiler::profiler::DatasetProfiler;
use dataset_profiler::session::AnalysisSession;
use dataset_profiler::test_fixtures::create_sensor_dataset;
use std::hint::black_box;
use std::time::Duration;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn datasets() -> Vec<(usize, Dataset)> {
    SIZES
        .iter()
        .map(|&rows| (rows, create_sensor_dataset(rows).unwrap()))
        .collect()
}

fn bench_type_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("type_inference");

    let configs = vec![
        ("default_sample", TypeInferenceEngine::new()),
        (
            "large_sample",
            TypeInferenceEngine::builder().sample_size(10_000).build(),
        ),
    ];

    for (rows, dataset) in datasets() {
        group.throughput(Throughput::Elements(rows as u64));
        for (name, engine) in &configs {
            group.bench_with_input(BenchmarkId::new(*name, rows), &dataset, |b, dataset| {
                b.iter(|| engine.infer_kinds(black_box(dataset)));
            });
        }
    }

    group.finish();
}

fn bench_summaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("summaries");
    group.measurement_time(Duration::from_secs(8));

    for (rows, dataset) in datasets() {
        let kinds = TypeInferenceEngine::new().infer_kinds(&dataset);
        let engine = SummaryEngine::new();
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &dataset, |b, dataset| {
            b.iter(|| engine.summarize(black_box(dataset), black_box(&kinds)));
        });
    }

    group.finish();
}

fn bench_histogram_and_top_k(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_and_top_k");

    for (rows, dataset) in datasets() {
        for bins in [BinCount::Fixed(10), BinCount::Fixed(100), BinCount::SquareRoot] {
            let label = match bins {
                BinCount::Fixed(n) => format!("fixed_{n}"),
                BinCount::SquareRoot => "square_root".to_string(),
            };
            group.bench_with_input(BenchmarkId::new(label, rows), &dataset, |b, dataset| {
                b.iter(|| histogram(black_box(dataset), "reading", bins));
            });
        }

        group.bench_with_input(BenchmarkId::new("top_k", rows), &dataset, |b, dataset| {
            b.iter(|| top_k(dataset.column("station").into_iter().flatten(), 15));
        });
        group.bench_with_input(BenchmarkId::new("duplicates", rows), &dataset, |b, dataset| {
            b.iter(|| count_duplicates(black_box(dataset)));
        });
    }

    group.finish();
}

fn bench_full_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_profile");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let profiler = DatasetProfiler::new();
    for (rows, dataset) in datasets() {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &dataset, |b, dataset| {
            b.iter(|| profiler.profile(black_box(dataset)));
        });
    }

    group.finish();
}

fn bench_chart_projections(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_projections");

    let requests = vec![
        ("bar_categorical", ChartRequest::bar("station")),
        ("bar_numeric", ChartRequest::bar("reading")),
        ("line", ChartRequest::line("label", "reading")),
        ("scatter", ChartRequest::scatter("id", "reading")),
    ];

    for (rows, dataset) in datasets() {
        let kinds = TypeInferenceEngine::new().infer_kinds(&dataset);
        let builder = ChartProjectionBuilder::new(&dataset, &kinds);
        for (name, request) in &requests {
            group.bench_with_input(BenchmarkId::new(*name, rows), request, |b, request| {
                b.iter(|| builder.build(black_box(request)));
            });
        }
    }

    group.finish();
}

fn bench_session_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_cache");

    let mut session = AnalysisSession::new();
    session.load(create_sensor_dataset(10_000).unwrap());
    let request = ChartRequest::scatter("id", "reading");
    session.chart_for(&request);

    group.bench_function("cached_scatter", |b| {
        b.iter(|| session.chart_for(black_box(&request)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_type_inference,
    bench_summaries,
    bench_histogram_and_top_k,
    bench_full_profile,
    bench_chart_projections,
    bench_session_cache
);
criterion_main!(benches);
