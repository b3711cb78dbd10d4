//! Fractional sample rate conversion between two integer rates.
//!
//! A [`SampleRateConverter`] links a *source* side (fixed block size, e.g. a
//! plugin host) with a *target* side (e.g. a DAC/ADC running at its own
//! rate). Each direction has its own linear interpolator, carried-over
//! boundary sample and pending queue, and its own pair of anti-aliasing
//! filters.
//!
//! Anti-aliasing has to happen at the higher rate: before the conversion when
//! the rate goes down, after it when the rate goes up. The `resample_*`
//! methods apply that order; the `convert_*` and `filter_*` methods expose
//! the steps individually.
//!
//! ```
//! use sal_audio_dsp::resampler::{ConverterConfig, SampleRateConverter};
//!
//! let config = ConverterConfig::new(96_000, 40_000, 512);
//! let mut converter = SampleRateConverter::<f32, f32>::new(config).unwrap();
//!
//! let mut source = [0.25; 512];
//! let mut target = vec![0.0; converter.max_target_block_len()];
//!
//! let conversion = converter.resample_source_to_target(&mut source, &mut target).unwrap();
//! assert!(conversion.complete);
//! assert_eq!(conversion.written, 214);
//! ```

pub mod config;
mod lane;

pub use config::ConverterConfig;

use self::lane::Lane;
use crate::error::Error;
use crate::filter::AntiAliasingFilter;
use crate::sample::Sample;

/// Outcome of one conversion call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// Samples written into the output block.
    pub written: usize,

    /// Source to target: every sample of the source block went into the
    /// output, nothing is left queued. Target to source: the source block
    /// was filled completely.
    pub complete: bool,
}

#[derive(Debug, Clone)]
pub struct SampleRateConverter<S: Sample, T: Sample> {
    config: ConverterConfig,
    max_target_block_len: usize,

    source_to_target: Lane<S, T>,
    target_to_source: Lane<T, S>,

    source_to_target_downsampling: AntiAliasingFilter<S>,
    source_to_target_upsampling: AntiAliasingFilter<T>,
    target_to_source_downsampling: AntiAliasingFilter<T>,
    target_to_source_upsampling: AntiAliasingFilter<S>,
}

impl<S: Sample, T: Sample> SampleRateConverter<S, T> {
    pub fn new(config: ConverterConfig) -> Result<Self, Error> {
        config.validate()?;

        let source_rate = config.source_rate;
        let target_rate = config.target_rate;
        let source_block_len = config.source_block_len;
        let max_target_block_len = config.max_target_block_len();
        let cutoff = config.cutoff();
        let order = config.filter_order;

        // One source block may come out after a block that did not fit.
        let target_queue = max_target_block_len;
        // A full block plus whatever one maximal target block adds on top.
        let source_queue = source_block_len
            + (max_target_block_len as u64 * source_rate as u64).div_ceil(target_rate as u64)
                as usize
            + 1;

        let converter = Self {
            config,
            max_target_block_len,
            source_to_target: Lane::new(source_rate, target_rate, target_queue),
            target_to_source: Lane::new(target_rate, source_rate, source_queue),
            source_to_target_downsampling: AntiAliasingFilter::new(cutoff, source_rate, order)?,
            source_to_target_upsampling: AntiAliasingFilter::new(cutoff, target_rate, order)?,
            target_to_source_downsampling: AntiAliasingFilter::new(cutoff, target_rate, order)?,
            target_to_source_upsampling: AntiAliasingFilter::new(cutoff, source_rate, order)?,
        };

        log::debug!(
            "Sample rate converter: {} Hz x {} <-> {} Hz x {} (max {})",
            source_rate,
            source_block_len,
            target_rate,
            converter.target_block_len(),
            max_target_block_len
        );

        Ok(converter)
    }

    /// Converts one source block into target samples.
    ///
    /// Samples still queued from the previous call are written first. Samples
    /// that do not fit into `target` are queued for the next call.
    pub fn convert_source_to_target(
        &mut self,
        source: &[S],
        target: &mut [T],
    ) -> Result<Conversion, Error> {
        self.check_source_to_target(source.len(), target.len())?;

        let Lane {
            interpolator,
            pending,
        } = &mut self.source_to_target;

        let mut written = pending.drain_into(target);

        interpolator.convert(source, |sample| {
            if let Some(slot) = target.get_mut(written) {
                *slot = sample;
                written += 1;
            } else {
                pending.push(sample);
            }
        });

        Ok(Conversion {
            written,
            complete: pending.is_empty(),
        })
    }

    /// Converts a block of target samples back towards the source rate.
    ///
    /// Converted samples are queued. As soon as a full source block is
    /// available it is written into `source`; otherwise `source` stays
    /// untouched and the samples wait for the next call.
    pub fn convert_target_to_source(
        &mut self,
        target: &[T],
        source: &mut [S],
    ) -> Result<Conversion, Error> {
        self.check_target_to_source(target.len(), source.len())?;

        let Lane {
            interpolator,
            pending,
        } = &mut self.target_to_source;

        interpolator.convert(target, |sample| pending.push(sample));

        if pending.len() < source.len() {
            return Ok(Conversion::default());
        }

        let written = pending.drain_into(source);

        Ok(Conversion {
            written,
            complete: true,
        })
    }

    /// Converts source to target with anti-aliasing on the side of the higher
    /// rate.
    pub fn resample_source_to_target(
        &mut self,
        source: &mut [S],
        target: &mut [T],
    ) -> Result<Conversion, Error> {
        if self.source_to_target_is_upsampling() {
            let conversion = self.convert_source_to_target(source, target)?;
            self.filter_source_to_target_upsampling(&mut target[..conversion.written]);

            Ok(conversion)
        } else {
            self.check_source_to_target(source.len(), target.len())?;
            self.filter_source_to_target_downsampling(source);

            self.convert_source_to_target(source, target)
        }
    }

    /// Converts target to source with anti-aliasing on the side of the higher
    /// rate.
    pub fn resample_target_to_source(
        &mut self,
        target: &mut [T],
        source: &mut [S],
    ) -> Result<Conversion, Error> {
        if self.target_to_source_is_upsampling() {
            let conversion = self.convert_target_to_source(target, source)?;
            self.filter_target_to_source_upsampling(&mut source[..conversion.written]);

            Ok(conversion)
        } else {
            self.check_target_to_source(target.len(), source.len())?;
            self.filter_target_to_source_downsampling(target);

            self.convert_target_to_source(target, source)
        }
    }

    /// Anti-aliasing for source data at the source rate, before reducing the
    /// rate towards the target.
    pub fn filter_source_to_target_downsampling(&mut self, block: &mut [S]) {
        self.source_to_target_downsampling.process(block);
    }

    /// Anti-aliasing for converted data at the target rate, after increasing
    /// the rate from the source.
    pub fn filter_source_to_target_upsampling(&mut self, block: &mut [T]) {
        self.source_to_target_upsampling.process(block);
    }

    /// Anti-aliasing for target data at the target rate, before reducing the
    /// rate towards the source.
    pub fn filter_target_to_source_downsampling(&mut self, block: &mut [T]) {
        self.target_to_source_downsampling.process(block);
    }

    /// Anti-aliasing for converted data at the source rate, after increasing
    /// the rate from the target.
    pub fn filter_target_to_source_upsampling(&mut self, block: &mut [S]) {
        self.target_to_source_upsampling.process(block);
    }

    pub fn set_source_rate(&mut self, source_rate: u32) -> Result<(), Error> {
        self.reconfigure(ConverterConfig {
            source_rate,
            ..self.config
        })
    }

    pub fn set_target_rate(&mut self, target_rate: u32) -> Result<(), Error> {
        self.reconfigure(ConverterConfig {
            target_rate,
            ..self.config
        })
    }

    pub fn set_source_block_len(&mut self, source_block_len: usize) -> Result<(), Error> {
        self.reconfigure(ConverterConfig {
            source_block_len,
            ..self.config
        })
    }

    pub fn set_filter_order(&mut self, filter_order: usize) -> Result<(), Error> {
        self.reconfigure(ConverterConfig {
            filter_order,
            ..self.config
        })
    }

    /// Rebuilds everything from `config`. Positions, carried samples, queues
    /// and filter histories start over. On error nothing changes.
    ///
    /// Not real-time safe.
    pub fn reconfigure(&mut self, config: ConverterConfig) -> Result<(), Error> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Clears the history of all four anti-aliasing filters.
    pub fn reset_aa_filters(&mut self) {
        self.source_to_target_downsampling.reset();
        self.source_to_target_upsampling.reset();
        self.target_to_source_downsampling.reset();
        self.target_to_source_upsampling.reset();
    }

    /// Rewinds both directions: positions, carried samples and queues.
    pub fn reset_positions(&mut self) {
        self.source_to_target.reset();
        self.target_to_source.reset();
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    #[inline]
    pub fn source_rate(&self) -> u32 {
        self.config.source_rate
    }

    #[inline]
    pub fn target_rate(&self) -> u32 {
        self.config.target_rate
    }

    #[inline]
    pub fn source_block_len(&self) -> usize {
        self.config.source_block_len
    }

    /// Average number of target samples per source block.
    #[inline]
    pub fn target_block_len(&self) -> f32 {
        self.config.target_block_len()
    }

    /// Size a target buffer needs to take a full source block.
    #[inline]
    pub fn max_target_block_len(&self) -> usize {
        self.max_target_block_len
    }

    #[inline]
    pub fn source_to_target_is_upsampling(&self) -> bool {
        self.config.source_rate < self.config.target_rate
    }

    #[inline]
    pub fn target_to_source_is_upsampling(&self) -> bool {
        self.config.target_rate < self.config.source_rate
    }

    /// Read position of the source to target direction in source samples,
    /// counted from the sample carried over from the previous block.
    #[inline]
    pub fn source_to_target_position(&self) -> f32 {
        self.source_to_target.interpolator.position()
    }

    /// Read position of the target to source direction in target samples,
    /// counted from the sample carried over from the previous block.
    #[inline]
    pub fn target_to_source_position(&self) -> f32 {
        self.target_to_source.interpolator.position()
    }

    /// Last sample of the previous source block.
    #[inline]
    pub fn carried_source_sample(&self) -> S {
        self.source_to_target.interpolator.last()
    }

    /// Last sample of the previous target block.
    #[inline]
    pub fn carried_target_sample(&self) -> T {
        self.target_to_source.interpolator.last()
    }

    /// Target samples converted but not yet handed out.
    #[inline]
    pub fn pending_target_samples(&self) -> usize {
        self.source_to_target.pending.len()
    }

    /// Source samples converted but not yet handed out.
    #[inline]
    pub fn pending_source_samples(&self) -> usize {
        self.target_to_source.pending.len()
    }

    fn check_source_to_target(&self, source_len: usize, target_len: usize) -> Result<(), Error> {
        check_block_len(self.config.source_block_len, source_len)?;

        let lane = &self.source_to_target;
        let produced = lane.pending.len() + lane.interpolator.output_count(source_len);
        let capacity = lane.pending.capacity();

        if produced > target_len + capacity {
            log::warn!("Target side is not keeping up, {produced} samples for {target_len} slots");
            return Err(Error::Overrun { capacity });
        }

        Ok(())
    }

    fn check_target_to_source(&self, target_len: usize, source_len: usize) -> Result<(), Error> {
        check_block_len(self.config.source_block_len, source_len)?;

        let lane = &self.target_to_source;
        let queued = lane.pending.len() + lane.interpolator.output_count(target_len);
        let capacity = lane.pending.capacity();

        if queued > capacity {
            log::warn!("Source side is not keeping up, {queued} samples queued");
            return Err(Error::Overrun { capacity });
        }

        Ok(())
    }
}

fn check_block_len(expected: usize, actual: usize) -> Result<(), Error> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::BlockLength { expected, actual })
    }
}
