//! Benchmarks for the six-into-one mix bus.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slope_bank::dsp::mix;
use slope_bank::CHANNELS;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let channels: Vec<Vec<f32>> = (0..CHANNELS)
            .map(|ch| {
                (0..size)
                    .map(|i| ((i + ch * 7) as f32 / size as f32).fract() * 2.0 - 1.0)
                    .collect()
            })
            .collect();
        let views: [&[f32]; CHANNELS] = std::array::from_fn(|ch| channels[ch].as_slice());
        let mut output = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("sound", size), &size, |b, _| {
            b.iter(|| mix::mix_block(black_box(views), black_box(&mut output), true))
        });

        group.bench_with_input(BenchmarkId::new("shape", size), &size, |b, _| {
            b.iter(|| mix::mix_block(black_box(views), black_box(&mut output), false))
        });
    }

    group.finish();
}
