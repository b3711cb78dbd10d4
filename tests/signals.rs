//! Test signals and measurements
#![allow(dead_code)]

use std::f32::consts::PI;

/// Returns `len` samples of a sine wave, continuing at sample `offset`.
pub fn sine(frequency: f32, sample_rate: u32, amplitude: f32, offset: usize, len: usize) -> Vec<f32> {
    (offset..offset + len)
        .map(|n| amplitude * (2.0 * PI * frequency * n as f32 / sample_rate as f32).sin())
        .collect()
}

/// Returns the ramp 0, 1, 2, ... as floats.
pub fn ramp(len: usize) -> Vec<f32> {
    (0..len).map(|n| n as f32).collect()
}

/// Counts sign changes from negative to non-negative.
pub fn rising_zero_crossings(samples: &[f32]) -> usize {
    samples
        .windows(2)
        .filter(|pair| pair[0] < 0.0 && pair[1] >= 0.0)
        .count()
}

/// Estimates the frequency of a periodic signal from its zero crossings.
pub fn estimate_frequency(samples: &[f32], sample_rate: u32) -> f32 {
    let duration = samples.len() as f32 / sample_rate as f32;

    rising_zero_crossings(samples) as f32 / duration
}

/// Returns the largest absolute value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0, |peak, sample| f32::max(peak, sample.abs()))
}

/// Returns the root mean square.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    (samples.iter().map(|sample| sample * sample).sum::<f32>() / samples.len() as f32).sqrt()
}
