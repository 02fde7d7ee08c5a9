//! Criterion benchmarks for the rank scorer.
//!
//! Measures a single rating over a full default grid (5001 × 5001 cells),
//! once for a find inside the box and once for a find outside it.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package mapscore-scorer
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mapscore_core::{GridCell, GridConfig};
use mapscore_scorer::{ProbabilityField, ScoringOptions, rank_rating};

/// Deterministic field with a smooth peak and plenty of ties.
#[expect(
    clippy::float_arithmetic,
    reason = "synthetic field values are computed in floating point"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "grid indices stay far below 2^52"
)]
fn synthetic_field(side: usize) -> ProbabilityField {
    let centre = side as f64 / 2.0;
    let values = (0..side)
        .flat_map(|row| (0..side).map(move |column| (row, column)))
        .map(|(row, column)| {
            let dy = row as f64 - centre;
            let dx = column as f64 - centre;
            ((-(dx * dx + dy * dy) / 1e6).exp() * 100.0).floor()
        })
        .collect();
    match ProbabilityField::new(side, side, values) {
        Ok(field) => field,
        Err(err) => panic!("synthetic field is valid: {err}"),
    }
}

fn bench_rank_rating(c: &mut Criterion) {
    let config = GridConfig::default();
    let side = config.side_cell_count();
    let Ok(side_cells) = usize::try_from(side) else {
        panic!("default grid fits in memory");
    };
    let field = synthetic_field(side_cells);
    let options = ScoringOptions::default();

    let mut group = c.benchmark_group("rank_rating");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(20));
    group.throughput(Throughput::Elements(config.total_cell_count()));

    let cases = [
        ("inside", GridCell { x: 1800, y: 2600 }),
        ("outside", GridCell { x: -4, y: 2600 }),
    ];
    for (name, cell) in cases {
        group.bench_with_input(BenchmarkId::new("find", name), &cell, |b, &find| {
            b.iter(|| rank_rating(black_box(&field), find, side, &options));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank_rating);
criterion_main!(benches);
