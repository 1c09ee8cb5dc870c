//! One benchmark per cell of the mode matrix, all channels active.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slope_bank::{BankConfig, Cell, OutputBuffers, Params, SignalInputs, SlopeBank};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_cells(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/cells");

    for &size in BLOCK_SIZES {
        // A gate that opens on the first sample and stays high keeps every
        // envelope cell busy.
        let mut gate = vec![1.0f32; size];
        gate[0] = 0.0;

        for cell in Cell::ALL {
            let params = Params::default()
                .mode(cell.mode())
                .range(cell.range())
                .run_enabled(cell.run_enabled())
                .time(0.6)
                .intone(0.8)
                .run(0.3)
                .fm_index(0.5);
            let (mut bank, _handle) = SlopeBank::new(BankConfig::new(SAMPLE_RATE));
            let mut buffers = OutputBuffers::new(size);
            let inputs = SignalInputs::default().trigger(5, &gate);

            group.bench_with_input(BenchmarkId::new(cell.name(), size), &size, |b, _| {
                b.iter(|| {
                    bank.process(
                        black_box(&params.block()),
                        black_box(&inputs),
                        &mut buffers.view(size),
                    )
                })
            });
        }
    }

    group.finish();
}
