use analytics::analytics_core::auto_engine;
use analytics::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use std::sync::Arc;

fn generate_table(rows: usize, cols: usize) -> HomogenTable<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let normal = Normal::new(0.0f32, 3.0).unwrap();
    let data = (0..rows * cols).map(|_| normal.sample(&mut rng)).collect();
    HomogenTable::from_vec(rows, cols, data).unwrap()
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_engines");
    for &(rows, cols) in &[(50_000, 2), (5_000, 64)] {
        let table: Arc<dyn NumericTable<f32>> = Arc::new(generate_table(rows, cols));
        let label = format!("{rows}x{cols}");

        let mut reference = ZScoreBatch::new(
            ExecutionConfig::reference().build_engine::<f32>().unwrap(),
        );
        reference.set_input(table.clone());
        group.bench_function(BenchmarkId::new("reference", &label), |b| {
            b.iter(|| black_box(reference.compute().is_ok()))
        });

        let mut auto = ZScoreBatch::new(auto_engine::<f32>());
        auto.set_input(table);
        group.bench_function(BenchmarkId::new("auto", &label), |b| {
            b.iter(|| black_box(auto.compute().is_ok()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
