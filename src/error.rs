//! Configuration errors.

use thiserror::Error;

/// Errors reported when a component is built or reconfigured with parameters
/// it cannot work with, or when a caller hands over blocks of the wrong size.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    #[error("cutoff {cutoff} Hz is outside (0, {nyquist}] Hz")]
    InvalidCutoff { cutoff: f32, nyquist: f32 },

    #[error("filter order must be odd and non-zero, got {0}")]
    InvalidFilterOrder(usize),

    #[error("block length must be non-zero")]
    EmptyBlock,

    #[error("block of {len} samples is shorter than one resampling step ({required} samples)")]
    BlockTooShort { len: usize, required: usize },

    #[error("expected a block of {expected} samples, got {actual}")]
    BlockLength { expected: usize, actual: usize },

    #[error("pending sample queue would exceed its capacity of {capacity} samples")]
    Overrun { capacity: usize },
}
