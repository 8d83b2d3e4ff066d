//! Performance benchmarks for key estimation

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use clavis::model::PitchClass;
use clavis::{estimate_key, EstimatorConfig};

fn bench_estimate_key(c: &mut Criterion) {
    // Synthetic diatonic sequence cycling through the C major scale
    // (a few hundred observations, comparable to a full piece).
    let scale = [0usize, 2, 4, 5, 7, 9, 11];
    let observations: Vec<PitchClass> = (0..512)
        .map(|i| PitchClass::from_index(scale[i % scale.len()]).unwrap())
        .collect();

    let config = EstimatorConfig::default();

    c.bench_function("estimate_key_512_obs", |b| {
        b.iter(|| {
            let _ = estimate_key(black_box(&observations), black_box(&config));
        });
    });
}

criterion_group!(benches, bench_estimate_key);
criterion_main!(benches);
