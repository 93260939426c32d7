// Shot detection benchmark - full pipeline and individual stages on a 4000x26 matrix
//
// Run with: cargo bench --bench detection_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shot_boundary_detector::{
    analyze, compute_distances, estimate_thresholds, read_feature_matrix, write_feature_matrix,
    FeatureMatrix, ShotDetectorConfig,
};

/// Synthetic histograms with a hard cut every 250 frames and a dissolve every 400
fn synthetic_matrix(frames: usize) -> FeatureMatrix {
    let rows: Vec<Vec<f64>> = (0..frames)
        .map(|frame| {
            let shot = (frame / 250) as f64;
            let fade = (frame % 400).min(20) as f64;
            (0..26)
                .map(|bin| {
                    if bin == 0 {
                        76800.0
                    } else {
                        ((bin * 37 + frame * 3) % 11) as f64 + shot * 90.0 + fade * 4.0
                    }
                })
                .collect()
        })
        .collect();
    FeatureMatrix::from_rows(&rows).expect("synthetic matrix is well formed")
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for frames in [1000usize, 4000, 16000] {
        let matrix = synthetic_matrix(frames);
        let config = ShotDetectorConfig {
            frames: Some(frames),
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::new("analyze", frames), &matrix, |b, m| {
            b.iter(|| black_box(analyze(black_box(m), &config)));
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let matrix = synthetic_matrix(4000);
    let config = ShotDetectorConfig::default();

    group.bench_function("distances_4000x26", |b| {
        b.iter(|| black_box(compute_distances(black_box(&matrix))));
    });

    let series = compute_distances(&matrix);
    group.bench_function("thresholds_4000", |b| {
        b.iter(|| black_box(estimate_thresholds(black_box(&series), &config)));
    });

    let mut encoded = Vec::new();
    write_feature_matrix(&mut encoded, &matrix, ',').expect("in-memory write");
    group.bench_function("parse_4000x26", |b| {
        b.iter(|| black_box(read_feature_matrix(black_box(encoded.as_slice()), &config)));
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_stages);
criterion_main!(benches);
