//! Windowed-sinc FIR low-pass filter.
//!
//! The filter keeps the last `order` input samples in a circular history and
//! replaces every sample of a block with the convolution of that history
//! against the kernel. All arithmetic runs in `f32` on values centred on the
//! sample type's zero point, so offset-binary data is filtered the same way
//! as signed data.

use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use super::window::design_lowpass;
use crate::error::Error;
use crate::sample::Sample;

#[derive(Debug, Clone)]
pub struct AntiAliasingFilter<T: Sample> {
    cutoff: f32,
    sample_rate: u32,
    order: usize,
    coefficients: Vec<f32>,
    history: Vec<f32>,
    cursor: usize,
    _sample: PhantomData<T>,
}

impl<T: Sample> AntiAliasingFilter<T> {
    /// Creates a filter with `order` taps and a cutoff in Hz at `sample_rate`.
    ///
    /// `order` must be odd so the kernel has a centre tap, the cutoff must lie
    /// in `(0, sample_rate / 2]`.
    pub fn new(cutoff: f32, sample_rate: u32, order: usize) -> Result<Self, Error> {
        validate(cutoff, sample_rate, order)?;

        let mut filter = Self {
            cutoff,
            sample_rate,
            order,
            coefficients: vec![0.0; order],
            history: vec![0.0; order],
            cursor: 0,
            _sample: PhantomData,
        };
        filter.design();

        Ok(filter)
    }

    /// Filters `block` in place.
    #[inline]
    pub fn process(&mut self, block: &mut [T]) {
        let zero = T::ZERO_POINT.to_raw();

        for sample in block.iter_mut() {
            self.history[self.cursor] = sample.to_raw() - zero;

            // Tap k pairs with the input k samples back in time.
            let (newer, older) = self.history.split_at(self.cursor + 1);
            let output: f32 = self
                .coefficients
                .iter()
                .zip(newer.iter().rev().chain(older.iter().rev()))
                .map(|(c, x)| c * x)
                .sum();

            *sample = T::from_raw(zero + output);

            self.cursor += 1;
            if self.cursor >= self.order {
                self.cursor = 0;
            }
        }
    }

    /// Redesigns the filter and clears its history.
    ///
    /// Not real-time safe: the sudden loss of history is audible and a larger
    /// order reallocates.
    pub fn change_values(&mut self, cutoff: f32, sample_rate: u32, order: usize) -> Result<(), Error> {
        validate(cutoff, sample_rate, order)?;

        self.cutoff = cutoff;
        self.sample_rate = sample_rate;
        self.order = order;
        self.coefficients.resize(order, 0.0);
        self.history.resize(order, 0.0);
        self.design();
        self.reset();

        Ok(())
    }

    /// Clears the history to silence.
    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.cursor = 0;
    }

    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    fn design(&mut self) {
        let normalized_cutoff = self.cutoff / self.sample_rate as f32;
        design_lowpass(&mut self.coefficients, normalized_cutoff);

        log::debug!(
            "Anti-aliasing filter: {} taps, cutoff {} Hz at {} Hz",
            self.order,
            self.cutoff,
            self.sample_rate
        );
    }
}

fn validate(cutoff: f32, sample_rate: u32, order: usize) -> Result<(), Error> {
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }

    if order == 0 || order % 2 == 0 {
        return Err(Error::InvalidFilterOrder(order));
    }

    let nyquist = sample_rate as f32 * 0.5;
    if !cutoff.is_finite() || cutoff <= 0.0 || cutoff > nyquist {
        return Err(Error::InvalidCutoff { cutoff, nyquist });
    }

    Ok(())
}
