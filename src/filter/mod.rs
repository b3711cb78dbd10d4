//! Anti-aliasing filters.
//!
//! Linear-phase FIR low-pass filters designed with a Hamming-windowed sinc
//! kernel. They are meant as a utility for rate conversion: filter before
//! reducing the rate, after increasing it, always at the higher of the two
//! rates.

pub mod anti_aliasing;
pub mod window;

pub use anti_aliasing::AntiAliasingFilter;
