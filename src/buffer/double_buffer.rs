//! Mono double buffer.

use alloc::vec::Vec;
use core::fmt;

use super::block_pair::BlockPair;
use super::{insert_unique, remove_producer, ProducerHandle};
use crate::sample::Sample;

/// Two blocks of `N` samples, one drained by the consumer while the other is
/// filled by the registered producers.
///
/// Cloning copies both blocks and shares the producer handles.
#[derive(Clone)]
pub struct DoubleBuffer<T: Sample, const N: usize> {
    blocks: BlockPair<T, N>,
    producers: Vec<ProducerHandle<T>>,
}

impl<T: Sample, const N: usize> Default for DoubleBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample, const N: usize> fmt::Debug for DoubleBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleBuffer")
            .field("blocks", &self.blocks)
            .field("producers", &self.producers.len())
            .finish()
    }
}

impl<T: Sample, const N: usize> DoubleBuffer<T, N> {
    /// Creates a buffer with both blocks set to the zero point.
    pub fn new() -> Self {
        Self {
            blocks: BlockPair::new(),
            producers: Vec::new(),
        }
    }

    /// Block size in samples.
    #[inline]
    pub fn num_samples(&self) -> usize {
        N
    }

    /// Registers a producer. Returns `false` if it was already registered.
    pub fn register_producer(&mut self, producer: &ProducerHandle<T>) -> bool {
        let added = insert_unique(&mut self.producers, producer);

        if added {
            log::debug!("Producer registered ({} total)", self.producers.len());
        }

        added
    }

    /// Detaches a producer. Returns `false` if it was not registered.
    pub fn unregister_producer(&mut self, producer: &ProducerHandle<T>) -> bool {
        let removed = remove_producer(&mut self.producers, producer);

        if removed {
            log::debug!("Producer unregistered ({} left)", self.producers.len());
        }

        removed
    }

    pub fn producers(&self) -> &[ProducerHandle<T>] {
        &self.producers
    }

    #[inline]
    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    /// Lets every producer fill the hidden block, unless that already happened
    /// since the last swap. Returns whether the producers were invoked.
    ///
    /// A producer that is mutably borrowed elsewhere is skipped. The hidden
    /// block is then silenced as a whole, so neither a partial mix nor old
    /// contents get played.
    pub fn poll_to_fill_buffers(&mut self) -> bool {
        if self.blocks.next_block_ready() {
            return false;
        }

        let hidden = self.blocks.hidden_mut();
        let mut skipped = false;

        for producer in self.producers.iter() {
            match producer.try_borrow_mut() {
                Ok(mut producer) => producer.fill(&mut hidden[..]),
                Err(_) => skipped = true,
            }
        }

        if skipped {
            log::warn!("Producer is busy elsewhere, block silenced");
            hidden.fill(T::ZERO_POINT);
        }

        self.blocks.mark_ready();

        true
    }

    /// Returns the next sample of the visible block and stores `write_back` in
    /// its slot, which lets an input stream be captured into the same cycle.
    #[inline]
    pub fn next_sample(&mut self, write_back: T) -> T {
        self.blocks.next_sample(write_back)
    }

    /// Same as [`Self::next_sample`], leaving silence behind.
    #[inline]
    pub fn next_sample_or_silence(&mut self) -> T {
        self.blocks.next_sample(T::ZERO_POINT)
    }

    /// Index of the next sample to be read from the visible block.
    #[inline]
    pub fn position(&self) -> usize {
        self.blocks.position()
    }

    /// Whether the hidden block has been filled for the upcoming swap.
    #[inline]
    pub fn next_block_ready(&self) -> bool {
        self.blocks.next_block_ready()
    }

    pub fn visible_block(&self) -> &[T; N] {
        self.blocks.visible()
    }

    pub fn hidden_block(&self) -> &[T; N] {
        self.blocks.hidden()
    }

    /// Both blocks in storage order, regardless of their current role.
    pub fn blocks(&self) -> (&[T; N], &[T; N]) {
        self.blocks.blocks()
    }
}
