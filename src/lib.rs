#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod buffer;
pub mod error;
pub mod filter;
pub mod resampler;
pub mod sample;

pub use error::Error;
pub use sample::Sample;

/// Sample rate of the plugin host side in Hz.
pub const HOST_SAMPLE_RATE: u32 = 96_000;

/// Sample rate of the hardware DAC/ADC side in Hz.
pub const DEVICE_SAMPLE_RATE: u32 = 40_000;

/// Block size used on the host side.
pub const HOST_BLOCK_SIZE: usize = 512;

/// Most samples one host block turns into on the device side. Device blocks
/// follow from the rate ratio and average
/// `HOST_BLOCK_SIZE * DEVICE_SAMPLE_RATE / HOST_SAMPLE_RATE` samples.
pub const DEVICE_MAX_BLOCK_SIZE: usize =
    (HOST_BLOCK_SIZE * DEVICE_SAMPLE_RATE as usize).div_ceil(HOST_SAMPLE_RATE as usize);

/// Order of the anti-aliasing filters used by the sample rate converter.
pub const DEFAULT_FILTER_ORDER: usize = 63;
