//! Performance measurement for complete single-frame decomposition

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use greedyrect::{Decomposer, DecomposerConfig};
use ndarray::Array3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

fn textured_image(rows: usize, cols: usize) -> Array3<f32> {
    Array3::from_shape_fn((rows, cols, 3), |(i, j, c)| {
        let gradient = i as f32 / rows as f32;
        let checker = ((i / 8 + j / 8) % 2) as f32;
        match c {
            0 => gradient,
            1 => checker,
            _ => (gradient + checker) / 2.0,
        }
    })
}

/// Measures a full 100-round cold-start decomposition of a 96×128 frame
fn bench_cold_start_decomposition(c: &mut Criterion) {
    let target = textured_image(96, 128);
    c.bench_function("cold_start_96x128", |b| {
        b.iter(|| {
            let decomposer = Decomposer::new(
                target.clone(),
                None,
                DecomposerConfig::default(),
                StdRng::seed_from_u64(12345),
            );
            let Ok(decomposer) = decomposer else {
                return;
            };
            black_box(decomposer.run().blocks.len());
        });
    });
}

/// Measures a warm-start pass over a frame close to its previous canvas
fn bench_warm_start_decomposition(c: &mut Criterion) {
    let target = textured_image(96, 128);
    let previous = Decomposer::new(
        target.clone(),
        None,
        DecomposerConfig::default(),
        StdRng::seed_from_u64(12345),
    )
    .map(|d| d.run().canvas)
    .ok();

    c.bench_function("warm_start_96x128", |b| {
        b.iter(|| {
            let decomposer = Decomposer::new(
                target.clone(),
                previous.clone(),
                DecomposerConfig::default(),
                StdRng::seed_from_u64(54321),
            );
            let Ok(decomposer) = decomposer else {
                return;
            };
            black_box(decomposer.run().fitness);
        });
    });
}

criterion_group!(
    benches,
    bench_cold_start_decomposition,
    bench_warm_start_decomposition
);
criterion_main!(benches);
