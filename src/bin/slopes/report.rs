//! Per-output summary: level statistics and the dominant frequency.

use rustfft::{num_complex::Complex, FftPlanner};

/// Largest FFT used for the frequency estimate
const MAX_FFT_LEN: usize = 1 << 16;

pub struct Stats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    /// Strongest non-DC frequency in Hz, if the signal moves at all
    pub dominant_hz: Option<f32>,
}

impl Stats {
    pub fn measure(samples: &[f32], sample_rate: f32) -> Self {
        let (min, max, sum) = samples.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0.0_f64),
            |(min, max, sum), &s| (min.min(s), max.max(s), sum + s as f64),
        );
        let mean = if samples.is_empty() {
            0.0
        } else {
            (sum / samples.len() as f64) as f32
        };

        Self {
            min: if samples.is_empty() { 0.0 } else { min },
            max: if samples.is_empty() { 0.0 } else { max },
            mean,
            dominant_hz: if max - min > 1e-6 {
                dominant_frequency(samples, sample_rate)
            } else {
                None
            },
        }
    }

    pub fn line(&self, name: &str) -> String {
        let freq = match self.dominant_hz {
            Some(hz) => format!("{hz:>10.3} Hz"),
            None => format!("{:>13}", "-"),
        };
        format!(
            "{name:>4}  min {:>7.4}  max {:>7.4}  mean {:>7.4}  peak {freq}",
            self.min, self.max, self.mean
        )
    }
}

/// Hann-windowed FFT peak with parabolic interpolation between bins.
pub fn dominant_frequency(samples: &[f32], sample_rate: f32) -> Option<f32> {
    let len = prev_power_of_two(samples.len().min(MAX_FFT_LEN));
    if len < 16 {
        return None;
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(len);

    let denom = (len - 1) as f32;
    let mut buffer: Vec<Complex<f32>> = samples[samples.len() - len..]
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let window = 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos());
            Complex::new(s * window, 0.0)
        })
        .collect();
    fft.process(&mut buffer);

    let magnitudes: Vec<f32> = buffer[..len / 2].iter().map(|c| c.norm()).collect();
    let (peak, _) = magnitudes
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))?;

    let offset = if peak + 1 < magnitudes.len() {
        let (a, b, c) = (magnitudes[peak - 1], magnitudes[peak], magnitudes[peak + 1]);
        let curvature = a - 2.0 * b + c;
        if curvature.abs() > f32::EPSILON {
            0.5 * (a - c) / curvature
        } else {
            0.0
        }
    } else {
        0.0
    };

    Some((peak as f32 + offset) * sample_rate / len as f32)
}

fn prev_power_of_two(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}
