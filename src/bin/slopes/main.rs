//! slopes - offline renderer for the slope bank
//!
//! Run with: cargo run --bin slopes -- --mode cycle --range sound --time 0.6

mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use hound::{SampleFormat, WavSpec, WavWriter};
use slope_bank::io::OUTPUT_STREAMS;
use slope_bank::{
    BankConfig, Mode, OutputBuffers, Params, Range, SignalInputs, SlopeBank, CHANNELS,
    MAX_BLOCK_SIZE,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Transient,
    Sustain,
    Cycle,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Transient => Mode::Transient,
            ModeArg::Sustain => Mode::Sustain,
            ModeArg::Cycle => Mode::Cycle,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RangeArg {
    Shape,
    Sound,
}

impl From<RangeArg> for Range {
    fn from(range: RangeArg) -> Self {
        match range {
            RangeArg::Shape => Range::Shape,
            RangeArg::Sound => Range::Sound,
        }
    }
}

/// Render the six slopes and the mix offline and report on them
#[derive(Parser, Debug)]
#[command(name = "slopes")]
#[command(version)]
struct Args {
    /// Sample rate in Hz
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    /// Length of the render in seconds
    #[arg(long, default_value_t = 2.0)]
    seconds: f32,

    /// Samples per processing block
    #[arg(long, default_value_t = 256)]
    block_size: usize,

    #[arg(long, value_enum, default_value_t = ModeArg::Cycle)]
    mode: ModeArg,

    #[arg(long, value_enum, default_value_t = RangeArg::Shape)]
    range: RangeArg,

    /// Swap in the RUN algorithm for the selected cell
    #[arg(long)]
    run_enabled: bool,

    #[arg(long, default_value_t = 0.5)]
    time: f32,

    #[arg(long, default_value_t = 0.5)]
    intone: f32,

    #[arg(long, default_value_t = 0.5)]
    ramp: f32,

    #[arg(long, default_value_t = 0.5)]
    curve: f32,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    run: f32,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    fm_index: f32,

    /// Trigger IDENTITY every N seconds (quantized to block starts)
    #[arg(long)]
    trigger_every: Option<f32>,

    /// Hold the gate of every channel high for N seconds from the start
    #[arg(long)]
    gate: Option<f32>,

    /// Write all seven outputs to a 32-bit float WAV file
    #[arg(long)]
    wav: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        return Err(eyre!("--seconds must be positive, got {}", args.seconds));
    }

    let rendered = render(&args)?;
    let sample_rate = args.sample_rate as f32;

    for (index, samples) in rendered.buffers.iter().enumerate() {
        let name = if index < CHANNELS {
            format!("ch{index}")
        } else {
            "mix".to_string()
        };
        println!("{}", report::Stats::measure(samples, sample_rate).line(&name));
    }

    if let Some(path) = &args.wav {
        write_wav(path, &rendered, args.sample_rate)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote wav");
    }

    Ok(())
}

fn render(args: &Args) -> color_eyre::Result<OutputBuffers> {
    let sample_rate = args.sample_rate as f32;
    let total = (args.seconds * sample_rate) as usize;
    let block_size = args.block_size.clamp(1, MAX_BLOCK_SIZE);

    let params = Params::default()
        .time(args.time)
        .intone(args.intone)
        .ramp(args.ramp)
        .curve(args.curve)
        .mode(args.mode.into())
        .range(args.range.into())
        .run(args.run)
        .fm_index(args.fm_index)
        .run_enabled(args.run_enabled);

    let (mut bank, mut handle) = SlopeBank::new(BankConfig::new(sample_rate));
    info!(
        cell = bank_cell_name(&params),
        total,
        block_size,
        "rendering"
    );

    let trigger_period = args
        .trigger_every
        .filter(|s| s.is_finite() && *s > 0.0)
        .map(|s| ((s * sample_rate) as usize).max(1));
    let gate_len = args
        .gate
        .filter(|s| s.is_finite() && *s > 0.0)
        .map(|s| (s * sample_rate) as usize);

    let mut rendered = OutputBuffers::new(total);
    let mut scratch = OutputBuffers::new(block_size);
    let mut next_trigger = 0;
    let mut gate_open = false;
    let block = params.block();
    let inputs = SignalInputs::default();

    let mut position = 0;
    while position < total {
        let len = block_size.min(total - position);

        if let Some(period) = trigger_period {
            if position >= next_trigger {
                handle.trigger(0).wrap_err("trigger dropped")?;
                while next_trigger <= position {
                    next_trigger += period;
                }
            }
        }

        if let Some(gate_len) = gate_len {
            let want = position < gate_len;
            if want != gate_open {
                for channel in 0..CHANNELS {
                    handle.gate(channel, want).wrap_err("gate dropped")?;
                }
                gate_open = want;
            }
        }

        bank.process(&block, &inputs, &mut scratch.view(len));

        for (dst, src) in rendered.buffers.iter_mut().zip(scratch.buffers.iter()) {
            dst[position..position + len].copy_from_slice(&src[..len]);
        }
        position += len;
    }

    Ok(rendered)
}

fn bank_cell_name(params: &Params) -> &'static str {
    slope_bank::Cell::select(params.mode, params.range, params.run_enabled).name()
}

fn write_wav(path: &Path, rendered: &OutputBuffers, sample_rate: u32) -> color_eyre::Result<()> {
    let spec = WavSpec {
        channels: OUTPUT_STREAMS as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for i in 0..rendered.len() {
        for buffer in rendered.buffers.iter() {
            writer.write_sample(buffer[i])?;
        }
    }
    writer.finalize()?;
    Ok(())
}
