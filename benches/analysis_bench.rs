use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use queue_lab::analysis::analyze;
use queue_lab::models::ModelParameters;

const SERVERS: u32 = 16;
const CAPACITY: u32 = 200;

fn build_cases() -> Vec<(String, ModelParameters)> {
    vec![
        ("mm1".to_string(), ModelParameters::new(4.0, 5.0)),
        (
            "mm1k".to_string(),
            ModelParameters::new(4.0, 5.0).with_capacity(CAPACITY),
        ),
        (
            "mmc".to_string(),
            ModelParameters::new(12.0, 1.0).with_servers(SERVERS),
        ),
        (
            "mmck".to_string(),
            ModelParameters::new(12.0, 1.0)
                .with_servers(SERVERS)
                .with_capacity(CAPACITY),
        ),
    ]
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    for (label, params) in build_cases() {
        group.bench_with_input(
            BenchmarkId::new(label, SERVERS),
            &params,
            |b, params: &ModelParameters| {
                b.iter(|| {
                    let analysis = analyze(black_box(params)).expect("analysis should succeed");
                    black_box(analysis);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
