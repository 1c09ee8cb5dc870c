//! Benchmarks for the curve shaper.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slope_bank::dsp::{curve, slope};

use crate::BLOCK_SIZES;

pub fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/curve");

    for &size in BLOCK_SIZES {
        let ramp: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut output = vec![0.0f32; size];

        for &(name, amount) in &[("square_log", 0.1_f32), ("linear", 0.5), ("exp_sine", 0.9)] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (o, &x) in output.iter_mut().zip(ramp.iter()) {
                        *o = curve::shape(black_box(x), black_box(amount));
                    }
                })
            });
        }

        group.bench_with_input(BenchmarkId::new("slope_then_shape", size), &size, |b, _| {
            b.iter(|| {
                for (i, o) in output.iter_mut().enumerate() {
                    let phase = i as f32 / size as f32;
                    *o = curve::shape(slope::slope(black_box(phase), 0.3), 0.7);
                }
            })
        });
    }

    group.finish();
}
