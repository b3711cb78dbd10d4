//! Two blocks with alternating visible/hidden roles.

use crate::sample::Sample;

#[derive(Debug, Clone)]
pub(crate) struct BlockPair<T: Sample, const N: usize> {
    blocks: [[T; N]; 2],
    visible: usize,
    position: usize,
    next_block_ready: bool,
}

impl<T: Sample, const N: usize> BlockPair<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "block size must be non-zero");

    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        Self {
            blocks: [[T::ZERO_POINT; N]; 2],
            visible: 0,
            position: 0,
            next_block_ready: false,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn next_block_ready(&self) -> bool {
        self.next_block_ready
    }

    #[inline]
    pub fn mark_ready(&mut self) {
        self.next_block_ready = true;
    }

    #[inline]
    pub fn visible(&self) -> &[T; N] {
        &self.blocks[self.visible]
    }

    #[inline]
    pub fn hidden(&self) -> &[T; N] {
        &self.blocks[self.visible ^ 1]
    }

    #[inline]
    pub fn hidden_mut(&mut self) -> &mut [T; N] {
        &mut self.blocks[self.visible ^ 1]
    }

    #[inline]
    pub fn blocks(&self) -> (&[T; N], &[T; N]) {
        (&self.blocks[0], &self.blocks[1])
    }

    /// Reads the sample under the cursor, stores `write_back` in its place and
    /// advances. Swaps the roles after the last sample of the visible block.
    #[inline]
    pub fn next_sample(&mut self, write_back: T) -> T {
        let slot = &mut self.blocks[self.visible][self.position];
        let value = core::mem::replace(slot, write_back);

        self.position += 1;

        if self.position >= N {
            self.position = 0;
            self.visible ^= 1;
            self.next_block_ready = false;
        }

        value
    }
}
