//! Audio-rate parameters and CV on every input, the worst case for a host.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slope_bank::{BankConfig, BlockParams, Mode, OutputBuffers, Range, SignalInputs, SlopeBank};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_modulated(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/modulated");

    for &size in BLOCK_SIZES {
        let sweep: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let bipolar: Vec<f32> = sweep.iter().map(|x| x * 2.0 - 1.0).collect();
        let cv: Vec<f32> = (0..size)
            .map(|i| (i as f32 * 0.05).sin() * 0.2)
            .collect();
        let clock: Vec<f32> = (0..size).map(|i| if i % 32 < 4 { 1.0 } else { 0.0 }).collect();

        for &(name, mode, range) in &[
            ("floom", Mode::Cycle, Range::Sound),
            ("spill", Mode::Transient, Range::Sound),
            ("strata", Mode::Sustain, Range::Shape),
        ] {
            let params = BlockParams {
                time: &sweep,
                intone: &sweep,
                ramp: &sweep,
                curve: &sweep,
                run: &bipolar,
                fm_index: &bipolar,
                range,
                mode,
                run_enabled: true,
            };
            let inputs = SignalInputs {
                time_cv: Some(cv.as_slice()),
                fm: Some(cv.as_slice()),
                intone_cv: Some(cv.as_slice()),
                run_cv: Some(cv.as_slice()),
                ramp_cv: Some(cv.as_slice()),
                triggers: [None, None, Some(clock.as_slice()), None, None, Some(clock.as_slice())],
            };
            let (mut bank, _handle) = SlopeBank::new(BankConfig::new(SAMPLE_RATE));
            let mut buffers = OutputBuffers::new(size);

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    bank.process(black_box(&params), black_box(&inputs), &mut buffers.view(size))
                })
            });
        }
    }

    group.finish();
}
