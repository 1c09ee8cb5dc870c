//! Benchmarks for TIME/INTONE frequency mapping.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slope_bank::dsp::frequency::{self, Range};
use slope_bank::CHANNELS;

use crate::BLOCK_SIZES;

pub fn bench_frequency(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/frequency");

    for &size in BLOCK_SIZES {
        let time: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let mut output = vec![0.0f32; size * CHANNELS];

        group.bench_with_input(BenchmarkId::new("map_six_channels", size), &size, |b, _| {
            b.iter(|| {
                for (i, &t) in time.iter().enumerate() {
                    for channel in 0..CHANNELS {
                        output[i * CHANNELS + channel] = frequency::map_frequency(
                            black_box(t),
                            0.0,
                            black_box(0.8),
                            0.0,
                            Range::Sound,
                            channel,
                        );
                    }
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("identity_then_ratio", size), &size, |b, _| {
            b.iter(|| {
                for (i, &t) in time.iter().enumerate() {
                    let identity = frequency::identity_frequency(black_box(t), 0.0, Range::Sound);
                    let spread = frequency::intone_spread(black_box(0.8), 0.0);
                    for channel in 0..CHANNELS {
                        output[i * CHANNELS + channel] =
                            frequency::channel_frequency(identity, spread, channel);
                    }
                }
            })
        });
    }

    group.finish();
}
