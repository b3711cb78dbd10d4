//! Stereo double buffer.
//!
//! Left and right keep separate read positions and block roles, so a consumer
//! may interleave reads freely. The producers always render both channels in
//! one call, which only happens once both channels have swapped.

use alloc::vec::Vec;
use core::fmt;

use super::block_pair::BlockPair;
use super::{insert_unique, remove_producer, StereoProducerHandle};
use crate::sample::Sample;

#[derive(Clone)]
pub struct StereoDoubleBuffer<T: Sample, const N: usize> {
    left: BlockPair<T, N>,
    right: BlockPair<T, N>,
    producers: Vec<StereoProducerHandle<T>>,
}

impl<T: Sample, const N: usize> Default for StereoDoubleBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample, const N: usize> fmt::Debug for StereoDoubleBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StereoDoubleBuffer")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("producers", &self.producers.len())
            .finish()
    }
}

impl<T: Sample, const N: usize> StereoDoubleBuffer<T, N> {
    pub fn new() -> Self {
        Self {
            left: BlockPair::new(),
            right: BlockPair::new(),
            producers: Vec::new(),
        }
    }

    #[inline]
    pub fn num_samples(&self) -> usize {
        N
    }

    pub fn register_producer(&mut self, producer: &StereoProducerHandle<T>) -> bool {
        let added = insert_unique(&mut self.producers, producer);

        if added {
            log::debug!("Stereo producer registered ({} total)", self.producers.len());
        }

        added
    }

    pub fn unregister_producer(&mut self, producer: &StereoProducerHandle<T>) -> bool {
        let removed = remove_producer(&mut self.producers, producer);

        if removed {
            log::debug!("Stereo producer unregistered ({} left)", self.producers.len());
        }

        removed
    }

    pub fn producers(&self) -> &[StereoProducerHandle<T>] {
        &self.producers
    }

    #[inline]
    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    /// Fills both hidden blocks once neither of them has been filled since
    /// its channel last swapped. Returns whether the producers were invoked.
    /// If a producer is busy elsewhere, both hidden blocks are silenced.
    pub fn poll_to_fill_buffers(&mut self) -> bool {
        if self.left.next_block_ready() || self.right.next_block_ready() {
            return false;
        }

        let left = self.left.hidden_mut();
        let right = self.right.hidden_mut();
        let mut skipped = false;

        for producer in self.producers.iter() {
            match producer.try_borrow_mut() {
                Ok(mut producer) => producer.fill(&mut left[..], &mut right[..]),
                Err(_) => skipped = true,
            }
        }

        if skipped {
            log::warn!("Stereo producer is busy elsewhere, blocks silenced");
            left.fill(T::ZERO_POINT);
            right.fill(T::ZERO_POINT);
        }

        self.left.mark_ready();
        self.right.mark_ready();

        true
    }

    #[inline]
    pub fn next_sample_left(&mut self, write_back: T) -> T {
        self.left.next_sample(write_back)
    }

    #[inline]
    pub fn next_sample_right(&mut self, write_back: T) -> T {
        self.right.next_sample(write_back)
    }

    /// Reads one frame, leaving silence behind in both channels.
    #[inline]
    pub fn next_frame(&mut self) -> (T, T) {
        (
            self.left.next_sample(T::ZERO_POINT),
            self.right.next_sample(T::ZERO_POINT),
        )
    }

    #[inline]
    pub fn position_left(&self) -> usize {
        self.left.position()
    }

    #[inline]
    pub fn position_right(&self) -> usize {
        self.right.position()
    }

    #[inline]
    pub fn next_block_ready_left(&self) -> bool {
        self.left.next_block_ready()
    }

    #[inline]
    pub fn next_block_ready_right(&self) -> bool {
        self.right.next_block_ready()
    }

    pub fn visible_blocks(&self) -> (&[T; N], &[T; N]) {
        (self.left.visible(), self.right.visible())
    }

    pub fn hidden_blocks(&self) -> (&[T; N], &[T; N]) {
        (self.left.hidden(), self.right.hidden())
    }

    /// Left channel blocks in storage order.
    pub fn blocks_left(&self) -> (&[T; N], &[T; N]) {
        self.left.blocks()
    }

    /// Right channel blocks in storage order.
    pub fn blocks_right(&self) -> (&[T; N], &[T; N]) {
        self.right.blocks()
    }
}
