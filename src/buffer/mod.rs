//! Double-buffered sample blocks and the producer contract.
//!
//! A [`DoubleBuffer`] owns two blocks of the same size. The consumer drains the
//! visible block one sample at a time while the registered producers fill the
//! hidden block in one go. Once the visible block is exhausted the roles are
//! swapped, so producers and consumer never work on the same memory.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use sal_audio_dsp::buffer::{DoubleBuffer, ProducerHandle};
//!
//! let ramp: ProducerHandle<f32> = Rc::new(RefCell::new(|block: &mut [f32]| {
//!     for (n, sample) in block.iter_mut().enumerate() {
//!         *sample = n as f32;
//!     }
//! }));
//!
//! let mut buffer = DoubleBuffer::<f32, 4>::new();
//! buffer.register_producer(&ramp);
//!
//! // The first visible block is silent, the ramp shows up after the swap.
//! buffer.poll_to_fill_buffers();
//! for _ in 0..4 {
//!     assert_eq!(buffer.next_sample_or_silence(), 0.0);
//! }
//! assert_eq!(buffer.next_sample_or_silence(), 0.0);
//! assert_eq!(buffer.next_sample_or_silence(), 1.0);
//! ```

mod block_pair;
pub mod double_buffer;
pub mod stereo_double_buffer;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::sample::Sample;

pub use double_buffer::DoubleBuffer;
pub use stereo_double_buffer::StereoDoubleBuffer;

/// Anything that renders one block of samples into a buffer handed to it.
///
/// The block is always exactly as long as the owning buffer's block size.
/// Whether the producer overwrites, transforms or adds to the existing
/// contents is up to the producer. Producers must not depend on the order in
/// which they are invoked relative to each other.
pub trait BufferProducer<T: Sample> {
    fn fill(&mut self, block: &mut [T]);
}

impl<T, F> BufferProducer<T> for F
where
    T: Sample,
    F: FnMut(&mut [T]),
{
    #[inline]
    fn fill(&mut self, block: &mut [T]) {
        self(block)
    }
}

/// Producer for the stereo buffer. Both channel blocks are handed over in the
/// same call.
pub trait StereoBufferProducer<T: Sample> {
    fn fill(&mut self, left: &mut [T], right: &mut [T]);
}

impl<T, F> StereoBufferProducer<T> for F
where
    T: Sample,
    F: FnMut(&mut [T], &mut [T]),
{
    #[inline]
    fn fill(&mut self, left: &mut [T], right: &mut [T]) {
        self(left, right)
    }
}

/// Shared handle through which a producer is registered.
pub type ProducerHandle<T> = Rc<RefCell<dyn BufferProducer<T>>>;

/// Shared handle through which a stereo producer is registered.
pub type StereoProducerHandle<T> = Rc<RefCell<dyn StereoBufferProducer<T>>>;

/// Identity comparison ignoring vtable pointers.
#[inline]
fn same_producer<P: ?Sized>(a: &Rc<RefCell<P>>, b: &Rc<RefCell<P>>) -> bool {
    Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
}

/// Adds `handle` unless the very same producer is already present.
fn insert_unique<P: ?Sized>(producers: &mut Vec<Rc<RefCell<P>>>, handle: &Rc<RefCell<P>>) -> bool {
    if producers.iter().any(|p| same_producer(p, handle)) {
        return false;
    }

    producers.push(Rc::clone(handle));
    true
}

/// Removes `handle` if present.
fn remove_producer<P: ?Sized>(producers: &mut Vec<Rc<RefCell<P>>>, handle: &Rc<RefCell<P>>) -> bool {
    let count = producers.len();
    producers.retain(|p| !same_producer(p, handle));

    producers.len() != count
}
