//! Sample representations.
//!
//! Blocks carry either floating point or fixed-width integer samples. Each
//! representation knows its zero point (the value meaning silence) and how it
//! maps into the signed normalized domain, where the zero point is `0.0` and
//! full scale is `±1.0`. Filters work on the raw values, converters
//! interpolate in the normalized domain.

use core::fmt::Debug;

#[allow(unused_imports)]
use num_traits::float::Float;
use num_traits::{cast, Bounded};

/// Scale between normalized values and 16-bit codes.
const SCALE_16BIT: f32 = 32768.0;

/// Zero point of offset-binary 16-bit samples.
pub const U16_ZERO_POINT: u16 = 32767;

pub trait Sample: Copy + Default + PartialEq + Debug + 'static {
    /// Value representing silence.
    const ZERO_POINT: Self;

    /// Raw value as a float, without any scaling.
    fn to_raw(self) -> f32;

    /// Converts a raw float back, rounding and saturating for integer types.
    fn from_raw(value: f32) -> Self;

    /// Maps the sample into the signed normalized domain.
    fn to_normalized(self) -> f32;

    /// Maps a normalized value back into this representation.
    fn from_normalized(value: f32) -> Self;
}

impl Sample for f32 {
    const ZERO_POINT: Self = 0.0;

    #[inline]
    fn to_raw(self) -> f32 {
        self
    }

    #[inline]
    fn from_raw(value: f32) -> Self {
        value
    }

    #[inline]
    fn to_normalized(self) -> f32 {
        self
    }

    #[inline]
    fn from_normalized(value: f32) -> Self {
        value
    }
}

impl Sample for i16 {
    const ZERO_POINT: Self = 0;

    #[inline]
    fn to_raw(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_raw(value: f32) -> Self {
        saturate(value)
    }

    #[inline]
    fn to_normalized(self) -> f32 {
        i16_to_f32(self)
    }

    #[inline]
    fn from_normalized(value: f32) -> Self {
        f32_to_i16(value)
    }
}

impl Sample for u16 {
    const ZERO_POINT: Self = U16_ZERO_POINT;

    #[inline]
    fn to_raw(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_raw(value: f32) -> Self {
        saturate(value)
    }

    #[inline]
    fn to_normalized(self) -> f32 {
        u16_to_f32(self)
    }

    #[inline]
    fn from_normalized(value: f32) -> Self {
        f32_to_u16(value)
    }
}

/// Rounds and clamps a float into the range of an integer type.
/// NaN maps to the type's zero point.
#[inline]
fn saturate<T>(value: f32) -> T
where
    T: Sample + Bounded + num_traits::NumCast,
{
    let min = cast::<T, f32>(T::min_value()).unwrap_or(f32::MIN);
    let max = cast::<T, f32>(T::max_value()).unwrap_or(f32::MAX);

    if value.is_nan() {
        return T::ZERO_POINT;
    }

    cast::<f32, T>(value.round().clamp(min, max)).unwrap_or(T::ZERO_POINT)
}

/// Signed normalized float to signed 16-bit code.
#[inline]
pub fn f32_to_i16(value: f32) -> i16 {
    saturate(value * SCALE_16BIT)
}

/// Signed 16-bit code to signed normalized float.
#[inline]
pub fn i16_to_f32(value: i16) -> f32 {
    value as f32 / SCALE_16BIT
}

/// Signed normalized float to offset-binary 16-bit code centred on
/// [`U16_ZERO_POINT`].
#[inline]
pub fn f32_to_u16(value: f32) -> u16 {
    saturate(value * SCALE_16BIT + U16_ZERO_POINT as f32)
}

/// Offset-binary 16-bit code to signed normalized float.
#[inline]
pub fn u16_to_f32(value: u16) -> f32 {
    (value as f32 - U16_ZERO_POINT as f32) / SCALE_16BIT
}
