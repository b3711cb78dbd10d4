//! One conversion direction: a linear interpolator with an exact fractional
//! read position, plus a bounded queue for converted samples that could not
//! be handed out yet.

use alloc::collections::VecDeque;

use crate::sample::Sample;

/// Greatest common divisor.
pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Linear interpolator between two rates.
///
/// The read position is kept as an integer count of `1 / den` input samples,
/// so it never drifts. Position 0 addresses the last sample of the previous
/// block, position `den` the first sample of the current one.
#[derive(Debug, Clone)]
pub(crate) struct Interpolator<I: Sample> {
    step: u64,
    den: u64,
    phase: u64,
    last: I,
}

impl<I: Sample> Interpolator<I> {
    pub fn new(input_rate: u32, output_rate: u32) -> Self {
        let divisor = gcd(input_rate as u64, output_rate as u64).max(1);

        Self {
            step: input_rate as u64 / divisor,
            den: output_rate as u64 / divisor,
            phase: 0,
            last: I::ZERO_POINT,
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0;
        self.last = I::ZERO_POINT;
    }

    /// Read position in input samples, relative to the carried-over sample.
    #[inline]
    pub fn position(&self) -> f32 {
        self.phase as f32 / self.den as f32
    }

    #[inline]
    pub fn last(&self) -> I {
        self.last
    }

    /// Number of samples [`Self::convert`] will emit for a block of `len`.
    #[inline]
    pub fn output_count(&self, len: usize) -> usize {
        let end = len as u64 * self.den;

        if self.phase >= end {
            0
        } else {
            (end - self.phase).div_ceil(self.step) as usize
        }
    }

    /// Interpolates across `input`, handing every output sample to `emit`.
    pub fn convert<O: Sample>(&mut self, input: &[I], mut emit: impl FnMut(O)) {
        let end = input.len() as u64 * self.den;
        let den = self.den as f32;

        while self.phase < end {
            let index = (self.phase / self.den) as usize;
            let fraction = (self.phase % self.den) as f32 / den;

            let a = if index == 0 {
                self.last
            } else {
                input[index - 1]
            }
            .to_normalized();
            let b = input[index].to_normalized();

            emit(O::from_normalized(a + (b - a) * fraction));

            self.phase += self.step;
        }

        self.phase -= end;

        if let Some(&sample) = input.last() {
            self.last = sample;
        }
    }
}

/// FIFO with a capacity fixed at construction.
#[derive(Debug, Clone)]
pub(crate) struct PendingQueue<T: Sample> {
    queue: VecDeque<T>,
    capacity: usize,
}

impl<T: Sample> PendingQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Callers check the remaining room up front.
    #[inline]
    pub fn push(&mut self, sample: T) {
        debug_assert!(self.queue.len() < self.capacity, "pending queue overrun");
        self.queue.push_back(sample);
    }

    /// Moves as many queued samples as fit into `out`. Returns how many.
    pub fn drain_into(&mut self, out: &mut [T]) -> usize {
        let count = self.queue.len().min(out.len());

        for (slot, sample) in out.iter_mut().zip(self.queue.drain(..count)) {
            *slot = sample;
        }

        count
    }
}

/// Interpolator and queue of one direction.
#[derive(Debug, Clone)]
pub(crate) struct Lane<I: Sample, O: Sample> {
    pub interpolator: Interpolator<I>,
    pub pending: PendingQueue<O>,
}

impl<I: Sample, O: Sample> Lane<I, O> {
    pub fn new(input_rate: u32, output_rate: u32, capacity: usize) -> Self {
        Self {
            interpolator: Interpolator::new(input_rate, output_rate),
            pending: PendingQueue::new(capacity),
        }
    }

    pub fn reset(&mut self) {
        self.interpolator.reset();
        self.pending.clear();
    }
}
