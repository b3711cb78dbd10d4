//! Windowed-sinc kernel design.

use core::f32::consts::PI;

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

use crate::DEFAULT_FILTER_ORDER;

/// Upper bound for the divide-by-sum passes of [`design_lowpass`].
pub const MAX_NORMALIZATION_PASSES: usize = 8;

static DEFAULT_HAMMING_WINDOW: Once<[f32; DEFAULT_FILTER_ORDER]> = Once::new();

/// Hamming window value at tap `n` of a window with `order` taps.
#[inline]
pub fn hamming(n: usize, order: usize) -> f32 {
    if order < 2 {
        return 1.0;
    }

    0.54 - 0.46 * ((2.0 * PI * n as f32) / (order as f32 - 1.0)).cos()
}

/// Hamming window for [`DEFAULT_FILTER_ORDER`] taps, built on first use and
/// shared afterwards.
pub fn default_hamming_window() -> &'static [f32; DEFAULT_FILTER_ORDER] {
    DEFAULT_HAMMING_WINDOW.call_once(|| core::array::from_fn(|n| hamming(n, DEFAULT_FILTER_ORDER)))
}

/// Ideal low-pass impulse response at tap `n`, centred on tap `(order - 1) / 2`.
/// `normalized_cutoff` is the cutoff divided by the sample rate. An empty
/// kernel (`order == 0`) has no taps and yields 0.0.
#[inline]
pub fn sinc_lowpass(n: usize, order: usize, normalized_cutoff: f32) -> f32 {
    if order == 0 {
        return 0.0;
    }

    let mid = (order - 1) / 2;
    let offset = n as f32 - mid as f32;

    if n == mid {
        2.0 * normalized_cutoff
    } else {
        let x = 2.0 * PI * normalized_cutoff * offset;
        2.0 * normalized_cutoff * (x.sin() / x)
    }
}

/// Writes a Hamming-windowed sinc low-pass kernel of `coefficients.len()` taps.
///
/// The kernel is built for the first half and mirrored, so it is exactly
/// symmetric. Afterwards it is divided by its own sum as long as the sum
/// exceeds 1.0, for at most [`MAX_NORMALIZATION_PASSES`] passes.
pub fn design_lowpass(coefficients: &mut [f32], normalized_cutoff: f32) {
    let order = coefficients.len();
    if order == 0 {
        return;
    }

    let table = (order == DEFAULT_FILTER_ORDER).then(default_hamming_window);

    for n in 0..=(order - 1) / 2 {
        let w = table.map_or_else(|| hamming(n, order), |window| window[n]);
        let value = sinc_lowpass(n, order, normalized_cutoff) * w;
        coefficients[n] = value;
        coefficients[order - 1 - n] = value;
    }

    let mut sum: f32 = coefficients.iter().sum();
    let mut passes = 0;

    while sum > 1.0 && passes < MAX_NORMALIZATION_PASSES {
        for c in coefficients.iter_mut() {
            *c /= sum;
        }
        sum = coefficients.iter().sum();
        passes += 1;
    }

    if sum > 1.0 {
        log::warn!("Filter kernel still sums to {sum} after {passes} normalization passes");
    }
}
