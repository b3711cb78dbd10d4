//! Sample rate converter configuration.

use crate::error::Error;
use crate::{DEFAULT_FILTER_ORDER, DEVICE_SAMPLE_RATE, HOST_BLOCK_SIZE, HOST_SAMPLE_RATE};

/// Rates and sizes a [`super::SampleRateConverter`] is built from.
///
/// The source block size is fixed, the target block size follows from the
/// rate ratio and is generally fractional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Source sample rate in Hz.
    pub source_rate: u32,

    /// Target sample rate in Hz.
    pub target_rate: u32,

    /// Samples per source block.
    pub source_block_len: usize,

    /// Taps of the anti-aliasing filters. Must be odd.
    pub filter_order: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new(HOST_SAMPLE_RATE, DEVICE_SAMPLE_RATE, HOST_BLOCK_SIZE)
    }
}

impl ConverterConfig {
    pub fn new(source_rate: u32, target_rate: u32, source_block_len: usize) -> Self {
        Self {
            source_rate,
            target_rate,
            source_block_len,
            filter_order: DEFAULT_FILTER_ORDER,
        }
    }

    pub fn with_filter_order(mut self, filter_order: usize) -> Self {
        self.filter_order = filter_order;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.source_rate == 0 {
            return Err(Error::InvalidSampleRate(self.source_rate));
        }

        if self.target_rate == 0 {
            return Err(Error::InvalidSampleRate(self.target_rate));
        }

        if self.source_block_len == 0 {
            return Err(Error::EmptyBlock);
        }

        if self.filter_order == 0 || self.filter_order % 2 == 0 {
            return Err(Error::InvalidFilterOrder(self.filter_order));
        }

        // A source block has to span at least one target sample period.
        let required = (self.source_rate as usize).div_ceil(self.target_rate as usize);
        if self.source_block_len < required {
            return Err(Error::BlockTooShort {
                len: self.source_block_len,
                required,
            });
        }

        Ok(())
    }

    /// Target samples per source block, usually fractional.
    pub fn target_block_len(&self) -> f32 {
        (self.source_block_len as f64 * self.target_rate as f64 / self.source_rate as f64) as f32
    }

    /// Most target samples a single source block can turn into.
    pub fn max_target_block_len(&self) -> usize {
        (self.source_block_len as u64 * self.target_rate as u64).div_ceil(self.source_rate as u64)
            as usize
    }

    #[inline]
    pub fn is_upsampling(&self) -> bool {
        self.source_rate < self.target_rate
    }

    /// Cutoff shared by all anti-aliasing filters: half the lower rate.
    pub fn cutoff(&self) -> f32 {
        self.source_rate.min(self.target_rate) as f32 * 0.5
    }
}
